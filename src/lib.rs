//! # Reflang - A Core Language with First-Class References
//!
//! Reflang is the executable core of an ML-style language with heap cells and
//! *ref aggregates*: pairs whose fields may safely alias other data. It pairs a
//! small-step operational semantics with a static type system that decides
//! which aggregates may hold references.
//!
//! ## Architecture Overview
//!
//! 1. **Core** (`core`) - Literals, values, expressions and substitution
//! 2. **Type Checking** (`types`) - Syntax-directed typing plus field validity
//! 3. **Interpreter** (`interpreter`) - Decomposition, head steps and the heap
//! 4. **Programs** (`programs`) - Sample programs built from expression builders
//!
//! ## Pipeline Flow
//!
//! ```text
//! Expr builders (core::Expr)
//!     ↓
//! [Type Checker] → Type, or TypeError blaming a sub-expression
//!     ↓
//! [Machine] → decompose → head_step ↔ Heap → fill → …
//!     ↓
//! Value, or a stuck configuration
//! ```
//!
//! Type checking is optional: heap operations have no typing rules and are
//! only checked while running.
//!
//! ## Key Design Decisions
//!
//! ### Evaluation Order
//! Every binary-shaped construct evaluates its *right* operand first. This is
//! visible in effects: in `store (alloc 1) (alloc 2)` the cell holding 2 is
//! allocated first.
//!
//! ### Unique Decomposition
//! Each non-value expression splits into exactly one evaluation context and
//! one redex, so stepping is deterministic.
//!
//! ### Never-Reused Addresses
//! Freeing a cell leaves a tombstone and the allocation cursor only moves
//! forward. A dangling address stays dangling forever.
//!
//! ## Example
//!
//! ```
//! use reflang::core::{BinOp, Expr, Value};
//! use reflang::interpreter::Machine;
//! use reflang::types::{Type, TypeEnv, type_of};
//!
//! // let x = 20 in x + 22
//! let expr = Expr::let_in(
//!     "x",
//!     Expr::int(20),
//!     Expr::binop(BinOp::Plus, Expr::var("x"), Expr::int(22)),
//! );
//!
//! assert_eq!(type_of(&TypeEnv::empty(), &expr), Ok(Type::Int));
//! assert_eq!(Machine::new(expr).run(), Ok(Value::int(42)));
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - Expression and value definitions
//! - [`types`] - Static types, field validity and the checker
//! - [`interpreter`] - Reduction engine and heap
//! - [`programs`] - Bundled sample programs

pub mod core;
pub mod interpreter;
pub mod programs;
pub mod types;

pub use crate::core::{Expr, Value, is_value};
pub use interpreter::{Heap, Machine, Step, step, try_step};
pub use types::{Type, TypeEnv, TypeError, type_of};
