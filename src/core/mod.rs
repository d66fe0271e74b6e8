//! # Core Language - Values and Expressions
//!
//! This module defines the closed grammar every other part of the crate works
//! over: literals, values, expressions, binders and operators.
//!
//! ## Pipeline Position
//!
//! ```text
//! (external parser) → [CORE] → Type Checker
//!                           ↘ Reduction Engine ↔ Heap
//! ```
//!
//! ## Values vs Expressions
//!
//! A [`Value`] is a fully evaluated result. An [`Expr`] is a program that may
//! still reduce. Values embed into expressions through [`Expr::Val`], and
//! [`is_value`] is true for exactly that constructor. Note the two pair forms:
//!
//! ```text
//! Expr::Pair(r, e1, e2)       // a pair *constructor*, still a redex
//! Value::Pair { is_ref, .. }  // the pair value it reduces to
//! ```
//!
//! ## Ref Aggregates
//!
//! Pairs carry an `is_ref` tag. A ref-tagged pair is a *ref-struct*: every field
//! must itself be safe to alias, which the type checker enforces through the
//! field-validity judgment (see [`crate::types::field_valid`]). At runtime the
//! tag is carried along but never inspected.
//!
//! ## Derived Forms
//!
//! `let`, sequencing and plain lambdas are not constructors. They are built
//! from `Rec` and `App`:
//!
//! ```text
//! let x = e1 in e2   ≡   (rec _ x := e2) e1
//! e1; e2             ≡   (rec _ _ := e2) e1
//! λx. e              ≡   rec _ x := e
//! ```
//!
//! Because evaluation is right-to-left, the argument `e1` runs before the
//! function literal is even turned into a closure.

pub mod subst;

use std::fmt;

pub use subst::{subst, subst_binder};

/// A heap address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc(pub u64);

impl Loc {
    /// Shift this address by `offset` cells, or `None` if it would leave the
    /// address space.
    pub fn offset(self, offset: i64) -> Option<Loc> {
        self.0.checked_add_signed(offset).map(Loc)
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Unit,
    Loc(Loc),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Unit => write!(f, "()"),
            Literal::Loc(l) => write!(f, "{}", l),
        }
    }
}

/// A binding position. Anonymous binders bind nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binder {
    Anon,
    Named(String),
}

impl Binder {
    pub fn named(name: impl Into<String>) -> Self {
        Binder::Named(name.into())
    }

    /// Whether this binder binds `name`.
    pub fn binds(&self, name: &str) -> bool {
        matches!(self, Binder::Named(n) if n == name)
    }
}

impl fmt::Display for Binder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Binder::Anon => write!(f, "_"),
            Binder::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Runtime value. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Lit(Literal),
    /// A recursive closure. `name` rebinds the closure itself on application.
    Closure {
        name: Binder,
        param: Binder,
        body: Box<Expr>,
    },
    Pair {
        is_ref: bool,
        first: Box<Value>,
        second: Box<Value>,
    },
}

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Lit(Literal::Int(n))
    }

    pub fn bool(b: bool) -> Self {
        Value::Lit(Literal::Bool(b))
    }

    pub fn unit() -> Self {
        Value::Lit(Literal::Unit)
    }

    pub fn loc(l: Loc) -> Self {
        Value::Lit(Literal::Loc(l))
    }

    pub fn pair(is_ref: bool, first: Value, second: Value) -> Self {
        Value::Pair {
            is_ref,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Lit(Literal::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Lit(Literal::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_loc(&self) -> Option<Loc> {
        match self {
            Value::Lit(Literal::Loc(l)) => Some(*l),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Lit(lit) => write!(f, "{}", lit),
            Value::Closure { name, param, .. } => write!(f, "<rec {} {}>", name, param),
            Value::Pair {
                is_ref,
                first,
                second,
            } => {
                let tag = if *is_ref { "ref " } else { "" };
                write!(f, "{}({}, {})", tag, first, second)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    /// Logical not on booleans, bitwise not on integers.
    Neg,
    /// Integer negation.
    Minus,
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "~",
            UnOp::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Plus,
    Minus,
    Mult,
    Quot,
    Rem,
    And,
    Or,
    Xor,
    ShiftL,
    ShiftR,
    Le,
    Lt,
    Eq,
    /// Pointer arithmetic: location plus integer.
    Offset,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Mult => "*",
            BinOp::Quot => "/",
            BinOp::Rem => "%",
            BinOp::And => "&",
            BinOp::Or => "|",
            BinOp::Xor => "^",
            BinOp::ShiftL => "<<",
            BinOp::ShiftR => ">>",
            BinOp::Le => "<=",
            BinOp::Lt => "<",
            BinOp::Eq => "=",
            BinOp::Offset => "+ₗ",
        }
    }
}

/// Core expression.
///
/// Binary-shaped constructors evaluate their *second* operand first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Val(Value),
    Var(String),
    Rec(Binder, Binder, Box<Expr>),
    App(Box<Expr>, Box<Expr>),
    UnOp(UnOp, Box<Expr>),
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    Pair(bool, Box<Expr>, Box<Expr>),
    /// A plain aggregate, never ref-tagged.
    Class(Box<Expr>, Box<Expr>),
    Fst(Box<Expr>),
    Snd(Box<Expr>),
    AllocN(Box<Expr>, Box<Expr>),
    Free(Box<Expr>),
    Load(Box<Expr>),
    Store(Box<Expr>, Box<Expr>),
    /// Reference-of-variable. Only typeable over a bare [`Expr::Var`].
    Ref(Box<Expr>),
}

/// Whether `expr` is a fully evaluated value.
pub fn is_value(expr: &Expr) -> bool {
    matches!(expr, Expr::Val(_))
}

impl Expr {
    pub fn is_value(&self) -> bool {
        is_value(self)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Expr::Val(v) => Some(v),
            _ => None,
        }
    }

    pub fn int(n: i64) -> Self {
        Expr::Val(Value::int(n))
    }

    pub fn bool(b: bool) -> Self {
        Expr::Val(Value::bool(b))
    }

    pub fn unit() -> Self {
        Expr::Val(Value::unit())
    }

    pub fn loc(l: Loc) -> Self {
        Expr::Val(Value::loc(l))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// `rec f x := body`
    pub fn rec(name: impl Into<String>, param: impl Into<String>, body: Expr) -> Self {
        Expr::Rec(Binder::named(name), Binder::named(param), Box::new(body))
    }

    /// `λx. body`
    pub fn lam(param: impl Into<String>, body: Expr) -> Self {
        Expr::Rec(Binder::Anon, Binder::named(param), Box::new(body))
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Expr::App(Box::new(func), Box::new(arg))
    }

    /// `let name = value in body`
    pub fn let_in(name: impl Into<String>, value: Expr, body: Expr) -> Self {
        Expr::app(
            Expr::Rec(Binder::Anon, Binder::named(name), Box::new(body)),
            value,
        )
    }

    /// `first; second`
    pub fn seq(first: Expr, second: Expr) -> Self {
        Expr::app(
            Expr::Rec(Binder::Anon, Binder::Anon, Box::new(second)),
            first,
        )
    }

    pub fn unop(op: UnOp, operand: Expr) -> Self {
        Expr::UnOp(op, Box::new(operand))
    }

    pub fn binop(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinOp(op, Box::new(left), Box::new(right))
    }

    pub fn if_then_else(condition: Expr, then_expr: Expr, else_expr: Expr) -> Self {
        Expr::If(
            Box::new(condition),
            Box::new(then_expr),
            Box::new(else_expr),
        )
    }

    pub fn pair(is_ref: bool, first: Expr, second: Expr) -> Self {
        Expr::Pair(is_ref, Box::new(first), Box::new(second))
    }

    pub fn class(first: Expr, second: Expr) -> Self {
        Expr::Class(Box::new(first), Box::new(second))
    }

    pub fn fst(pair: Expr) -> Self {
        Expr::Fst(Box::new(pair))
    }

    pub fn snd(pair: Expr) -> Self {
        Expr::Snd(Box::new(pair))
    }

    pub fn alloc_n(size: Expr, init: Expr) -> Self {
        Expr::AllocN(Box::new(size), Box::new(init))
    }

    /// Single-cell allocation.
    pub fn alloc(init: Expr) -> Self {
        Expr::alloc_n(Expr::int(1), init)
    }

    pub fn free(loc: Expr) -> Self {
        Expr::Free(Box::new(loc))
    }

    pub fn load(loc: Expr) -> Self {
        Expr::Load(Box::new(loc))
    }

    pub fn store(loc: Expr, value: Expr) -> Self {
        Expr::Store(Box::new(loc), Box::new(value))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Expr::Ref(Box::new(Expr::var(name)))
    }

    /// Short constructor name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Val(_) => "Val",
            Expr::Var(_) => "Var",
            Expr::Rec(..) => "Rec",
            Expr::App(..) => "App",
            Expr::UnOp(..) => "UnOp",
            Expr::BinOp(..) => "BinOp",
            Expr::If(..) => "If",
            Expr::Pair(..) => "Pair",
            Expr::Class(..) => "Class",
            Expr::Fst(_) => "Fst",
            Expr::Snd(_) => "Snd",
            Expr::AllocN(..) => "AllocN",
            Expr::Free(_) => "Free",
            Expr::Load(_) => "Load",
            Expr::Store(..) => "Store",
            Expr::Ref(_) => "Ref",
        }
    }
}

/// Drop `expr` without recursing on its depth.
///
/// The derived drop glue walks the tree recursively, which overflows the
/// stack on very deep argument chains.
pub fn dismantle(expr: Expr) {
    let mut exprs = vec![expr];
    let mut values = Vec::new();

    while !exprs.is_empty() || !values.is_empty() {
        while let Some(expr) = exprs.pop() {
            match expr {
                Expr::Val(v) => values.push(v),
                Expr::Var(_) => {}
                Expr::Rec(_, _, e)
                | Expr::UnOp(_, e)
                | Expr::Fst(e)
                | Expr::Snd(e)
                | Expr::Free(e)
                | Expr::Load(e)
                | Expr::Ref(e) => exprs.push(*e),
                Expr::App(e1, e2)
                | Expr::BinOp(_, e1, e2)
                | Expr::Pair(_, e1, e2)
                | Expr::Class(e1, e2)
                | Expr::AllocN(e1, e2)
                | Expr::Store(e1, e2) => {
                    exprs.push(*e1);
                    exprs.push(*e2);
                }
                Expr::If(c, t, e) => {
                    exprs.push(*c);
                    exprs.push(*t);
                    exprs.push(*e);
                }
            }
        }

        while let Some(value) = values.pop() {
            match value {
                Value::Lit(_) => {}
                Value::Closure { body, .. } => exprs.push(*body),
                Value::Pair { first, second, .. } => {
                    values.push(*first);
                    values.push(*second);
                }
            }
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Val(value)
    }
}
