//! # Type Error Definitions
//!
//! Every failure of the static judgment is reported as one [`TypeError`]: the
//! smallest sub-expression whose rule did not apply, plus the reason.
//!
//! Type errors never surface during reduction. A caller that receives one
//! rejects the program before running it.
//!
//! ## Related Modules
//!
//! - [`crate::types::check`] - The checker that produces these errors
//! - [`crate::types::unify`] - Unification errors converted to `TypeError`

use thiserror::Error;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;
use crate::core::Expr;

/// Type error encountered while checking an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type error in {} expression: {reason}", .expr.kind())]
pub struct TypeError {
    /// The offending sub-expression.
    pub expr: Expr,
    pub reason: TypeErrorReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeErrorReason {
    /// Reference to a variable absent from the typing context.
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    /// Two types that must be equal are not.
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch { expected: Type, found: Type },

    /// Application of something whose type is not an arrow.
    #[error("cannot apply a value of type {0}")]
    NotAFunction(Type),

    /// A field type rejected by the field-validity judgment.
    #[error("{ty} is not a valid field of a {} aggregate", aggregate(.is_ref))]
    InvalidField { ty: Type, is_ref: bool },

    /// Projection out of something that is not an aggregate.
    #[error("cannot project from a value of type {0}")]
    NotAnAggregate(Type),

    /// `Ref` over anything but a bare variable.
    #[error("references can only be taken of a variable")]
    IllegalReference,

    /// A construct the static judgment has no rule for.
    #[error("no typing rule for this construct")]
    Untypable,

    /// Unification would build an infinite type.
    #[error("cannot construct infinite type {} = {ty}", Type::Var(.var.clone()))]
    OccursCheck { var: TypeVar, ty: Type },
}

fn aggregate(is_ref: &bool) -> &'static str {
    if *is_ref { "ref" } else { "plain" }
}

impl TypeError {
    pub fn new(expr: &Expr, reason: TypeErrorReason) -> Self {
        TypeError {
            expr: expr.clone(),
            reason,
        }
    }

    /// Convert a unification failure, blaming `expr`.
    pub fn from_unify_error(err: UnifyError, expr: &Expr) -> Self {
        let reason = match err {
            UnifyError::Mismatch { expected, found } => {
                TypeErrorReason::Mismatch { expected, found }
            }
            UnifyError::OccursCheck { var, ty } => TypeErrorReason::OccursCheck { var, ty },
        };
        TypeError::new(expr, reason)
    }
}
