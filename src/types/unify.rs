use std::fmt;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { expected: Type, found: Type },
    OccursCheck { var: TypeVar, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { expected, found } => {
                write!(
                    f,
                    "type mismatch: expected {}, found {}",
                    expected.pretty(),
                    found.pretty()
                )
            }
            UnifyError::OccursCheck { var, ty } => {
                write!(
                    f,
                    "occurs check: cannot construct infinite type {} = {}",
                    Type::Var(var.clone()).pretty(),
                    ty.pretty()
                )
            }
        }
    }
}

/// Check if a type variable occurs within a type (occurs check).
///
/// Binding `'t0 := 't0 -> Int` would describe an infinite type, so
/// unification refuses any binding whose right-hand side mentions the
/// variable being bound.
///
/// ```text
/// occurs_in('t0, Int) = false
/// occurs_in('t0, 't0) = true
/// occurs_in('t0, ref ('t0 * Int)) = true
/// ```
fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Int | Type::Unit | Type::Bool => false,
        Type::Var(v) => v == var,
        Type::Ref(t) => occurs_in(var, t),
        Type::Pair(_, t1, t2) | Type::Class(t1, t2) | Type::Arrow(t1, t2) => {
            occurs_in(var, t1) || occurs_in(var, t2)
        }
    }
}

/// Unify two types, finding a substitution that makes them equal.
///
/// Unification here is exact: there is no subtyping and no join, so the only
/// freedom is in the type variables standing for un-annotated parameters.
///
/// ## Base Cases
///
/// ```text
/// Unify(Int, Int) = ∅
/// Unify(Int, Bool) = Error
/// Unify('t0, Int) = [t0 := Int]
/// Unify('t0, 't0 -> Int) = Error   // occurs check
/// ```
///
/// ## Compound Types
///
/// Both components are unified left to right, threading the substitution
/// from the first into the second:
///
/// ```text
/// Unify('t0 -> 't0, Int -> 't1):
///   Unify 't0 with Int → S1 = [t0 := Int]
///   Unify S1('t0) = Int with S1('t1) = 't1 → S2 = [t1 := Int]
///   Result: S2 ∘ S1
/// ```
///
/// Pairs only unify with pairs of the same tagging, and a `Class` never
/// unifies with a `Pair`, even when the field types agree.
pub fn unify(t1: &Type, t2: &Type) -> Result<Substitution, UnifyError> {
    match (t1, t2) {
        (Type::Int, Type::Int) => Ok(Substitution::empty()),
        (Type::Unit, Type::Unit) => Ok(Substitution::empty()),
        (Type::Bool, Type::Bool) => Ok(Substitution::empty()),

        (Type::Var(v1), Type::Var(v2)) if v1 == v2 => Ok(Substitution::empty()),
        (Type::Var(v), t) | (t, Type::Var(v)) => {
            if occurs_in(v, t) {
                Err(UnifyError::OccursCheck {
                    var: v.clone(),
                    ty: t.clone(),
                })
            } else {
                Ok(Substitution::singleton(v.clone(), t.clone()))
            }
        }

        (Type::Ref(a), Type::Ref(b)) => unify(a, b),
        (Type::Pair(r1, a1, b1), Type::Pair(r2, a2, b2)) if r1 == r2 => unify_both(a1, b1, a2, b2),
        (Type::Class(a1, b1), Type::Class(a2, b2)) => unify_both(a1, b1, a2, b2),
        (Type::Arrow(a1, b1), Type::Arrow(a2, b2)) => unify_both(a1, b1, a2, b2),

        _ => Err(UnifyError::Mismatch {
            expected: t1.clone(),
            found: t2.clone(),
        }),
    }
}

fn unify_both(a1: &Type, b1: &Type, a2: &Type, b2: &Type) -> Result<Substitution, UnifyError> {
    let s1 = unify(a1, a2)?;
    let s2 = unify(&s1.apply(b1), &s1.apply(b2))?;
    Ok(s2.compose(&s1))
}
