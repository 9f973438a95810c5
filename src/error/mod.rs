//! Error types for validation failures and DSL misuse.
//!
//! Failed constraints are data, not errors: they are reported as
//! [`ConstraintViolation`]s inside a [`ConstraintViolationSet`]. Programming
//! mistakes in a declaration block are reported as [`MisuseError`].

mod misuse;
mod violation;

pub use misuse::MisuseError;
pub use violation::{ConstraintViolation, ConstraintViolationSet};
