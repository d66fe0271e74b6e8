//! Static type system: types, the field-validity judgment and the checker.

pub mod check;
pub mod env;
pub mod error;
pub mod subst;
pub mod ty;
pub mod unify;

pub use check::{Checker, type_of};
pub use env::TypeEnv;
pub use error::{TypeError, TypeErrorReason};
pub use subst::Substitution;
pub use ty::{Type, TypeVar, field_valid, field_validity};
