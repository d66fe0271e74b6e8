//! # Reduction Engine
//!
//! A small-step, call-by-value, right-to-left machine over [`crate::core::Expr`]
//! and a [`Heap`].
//!
//! One step is three moves:
//!
//! ```text
//! expr ──decompose──▶ K[redex] ──head_step──▶ K[redex'] ──fill──▶ expr'
//! ```
//!
//! 1. [`decompose`] finds the unique context `K` and redex inside `expr`
//! 2. [`head_step`] reduces the redex, possibly touching the heap
//! 3. [`Context::fill`] puts the result back
//!
//! If the head step fails the configuration is *stuck*, which is reported as
//! a [`StuckError`] and is distinct from having reached a value.
//!
//! ## Entry Points
//!
//! - [`step`] / [`try_step`] for single steps against a caller-owned heap
//! - [`Machine`] for running to completion with optional fuel
//!
//! ```
//! use reflang::core::{BinOp, Expr, Value};
//! use reflang::interpreter::Machine;
//!
//! let expr = Expr::binop(BinOp::Plus, Expr::int(1), Expr::int(2));
//! assert_eq!(Machine::new(expr).run(), Ok(Value::int(3)));
//! ```

mod context;
mod error;
mod head;
mod heap;
mod machine;

pub use context::{Context, Decomposition, Frame, decompose};
pub use error::{RunError, StuckError};
pub use head::{eval_binop, eval_unop, head_step};
pub use heap::{Heap, HeapError};
pub use machine::{Machine, MachineConfig, Progress, Step, step, try_step};
