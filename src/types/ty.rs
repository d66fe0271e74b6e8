use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub id: usize,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    Unit,
    /// A pair aggregate. The flag marks a ref-struct.
    Pair(bool, Box<Type>, Box<Type>),
    /// A plain aggregate, distinct from every `Pair`.
    Class(Box<Type>, Box<Type>),
    Ref(Box<Type>),
    Arrow(Box<Type>, Box<Type>),
    Var(TypeVar),
}

impl Type {
    pub fn arrow(t1: Type, t2: Type) -> Self {
        Type::Arrow(Box::new(t1), Box::new(t2))
    }

    pub fn pair(is_ref: bool, t1: Type, t2: Type) -> Self {
        Type::Pair(is_ref, Box::new(t1), Box::new(t2))
    }

    pub fn class(t1: Type, t2: Type) -> Self {
        Type::Class(Box::new(t1), Box::new(t2))
    }

    pub fn reference(ty: Type) -> Self {
        Type::Ref(Box::new(ty))
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        match self {
            Type::Int | Type::Bool | Type::Unit => HashSet::new(),
            Type::Var(v) => {
                let mut set = HashSet::new();
                set.insert(v.clone());
                set
            }
            Type::Ref(t) => t.free_type_vars(),
            Type::Pair(_, t1, t2) | Type::Class(t1, t2) | Type::Arrow(t1, t2) => {
                let mut set = t1.free_type_vars();
                set.extend(t2.free_type_vars());
                set
            }
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Int => "Int".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Unit => "Unit".to_string(),
            Type::Var(v) => format!("'t{}", v.id),
            Type::Pair(is_ref, t1, t2) => {
                let tag = if *is_ref { "ref " } else { "" };
                format!("{}({} * {})", tag, t1.pretty(), t2.pretty())
            }
            Type::Class(t1, t2) => format!("class({}, {})", t1.pretty(), t2.pretty()),
            Type::Ref(t) => format!("&{}", t.pretty()),
            Type::Arrow(t1, t2) => {
                let t1_str = if matches!(**t1, Type::Arrow(_, _)) {
                    format!("({})", t1.pretty())
                } else {
                    t1.pretty()
                };
                format!("{} -> {}", t1_str, t2.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// Whether `ty` may occupy a field of an aggregate tagged `is_ref`.
///
/// Base types and functions fit anywhere. A plain aggregate only nests inside
/// plain aggregates, a ref-struct only inside ref-structs, and both require
/// their own fields to be valid under their own tagging. References may only
/// live inside ref-structs, and only to types that are themselves ref-valid.
///
/// A type that still contains an undetermined type variable in a
/// position that matters is never valid; see [`field_validity`].
pub fn field_valid(ty: &Type, is_ref: bool) -> bool {
    field_validity(ty, is_ref) == Some(true)
}

/// Three-valued field validity: `None` when the answer depends on a type
/// variable that has not been solved yet.
///
/// `Bool` is accepted under both taggings, like `Int` and `Unit`.
pub fn field_validity(ty: &Type, is_ref: bool) -> Option<bool> {
    match ty {
        Type::Int | Type::Bool | Type::Unit | Type::Arrow(_, _) => Some(true),
        Type::Ref(_) if !is_ref => Some(false),
        Type::Ref(t) => field_validity(t, true),
        Type::Pair(inner, t1, t2) => {
            if *inner != is_ref {
                return Some(false);
            }
            both(field_validity(t1, *inner), field_validity(t2, *inner))
        }
        Type::Class(t1, t2) => {
            if is_ref {
                return Some(false);
            }
            both(field_validity(t1, false), field_validity(t2, false))
        }
        Type::Var(_) => None,
    }
}

// A definite `false` wins over an undetermined side.
fn both(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}
