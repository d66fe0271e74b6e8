use thiserror::Error;

use super::heap::HeapError;
use crate::core::{Expr, Value};

/// Why a non-value configuration has no next step.
///
/// A well-typed program whose heap operations only touch live cells never
/// gets stuck; hitting one of these in a test points at a checker or
/// decomposition bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StuckError {
    /// Free/load/store on something that is not a live cell.
    #[error("invalid address: {0}")]
    InvalidAddress(Value),

    /// An operator applied to operands it is not defined on.
    #[error("operator {op} is undefined on {}", operand_list(.operands))]
    OperatorMismatch {
        op: &'static str,
        operands: Vec<Value>,
    },

    #[error("cannot apply non-function value {0}")]
    NonFunctionApplication(Value),

    #[error("condition is not a boolean: {0}")]
    NonBooleanCondition(Value),

    #[error("cannot project from non-pair value {0}")]
    NonPairProjection(Value),

    #[error("invalid allocation size: {0}")]
    InvalidAllocationSize(Value),

    /// The program was not closed.
    #[error("free variable: {0}")]
    FreeVariable(String),

    #[error("reference to a non-variable {} expression", .0.kind())]
    MalformedReference(Expr),

    /// `head_step` was handed something decomposition would not produce.
    #[error("{} expression is not a redex", .0.kind())]
    NotARedex(Expr),
}

fn operand_list(operands: &[Value]) -> String {
    operands
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<HeapError> for StuckError {
    fn from(err: HeapError) -> Self {
        match err {
            HeapError::InvalidAddress(loc) => StuckError::InvalidAddress(Value::loc(loc)),
            HeapError::NonPositiveSize(n) => StuckError::InvalidAllocationSize(Value::int(n)),
        }
    }
}

/// Failure of a fuel-bounded run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("stuck after {steps} steps: {error}")]
    Stuck {
        /// The whole configuration at the point it got stuck.
        expr: Expr,
        error: StuckError,
        steps: usize,
    },
    #[error("out of fuel after {steps} steps")]
    OutOfFuel { steps: usize },
}
