//! Glob-importable set of the types and extension traits used in declaration blocks.
//!
//! ```rust
//! use scrutiny::prelude::*;
//! ```

pub use crate::builders::{
    EqualityConstraints, LengthConstraints, OrderConstraints, PresenceConstraints,
    TextConstraints,
};
pub use crate::config::Configuration;
pub use crate::constraint::Constraint;
pub use crate::error::{ConstraintViolation, ConstraintViolationSet};
pub use crate::path::Path;
pub use crate::suspendable::{SuspendableRunner, SuspendableValidator};
pub use crate::validatable::Validatable;
pub use crate::validator::{Runner, Validator};
pub use crate::ValidationResult;
