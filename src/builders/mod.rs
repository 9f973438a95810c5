//! Ready-made constraints with default messages.
//!
//! Each builder is an extension trait implemented for [`Validatable`] nodes
//! whose value fits it: [`LengthConstraints`] for strings and collections,
//! [`TextConstraints`] for text, [`OrderConstraints`] for numbers,
//! [`EqualityConstraints`] for anything comparable and
//! [`PresenceConstraints`] for optional values.
//!
//! Builders never fail on an absent value: a `None` node satisfies every
//! builder except [`PresenceConstraints::is_some`]. The default message of a
//! builder is attached right away; [`Constraint::otherwise`] replaces it.
//! A builder applied twice to the same path reports a single violation.
//!
//! ```rust
//! use scrutiny::prelude::*;
//!
//! #[derive(Debug)]
//! struct Book {
//!     title: String,
//!     pages: u32,
//! }
//!
//! let validator = Validator::new(|root: &Validatable<&Book>| {
//!     root.field("title", |b| b.title.as_str()).is_not_blank();
//!     root.field("pages", |b| b.pages).is_between(1..=2000);
//! });
//!
//! let violations = validator
//!     .validate(Book { title: "".into(), pages: 0 })
//!     .into_result()
//!     .unwrap_err();
//! let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
//! assert_eq!(messages, vec!["Must not be blank", "Must be between 1 and 2000"]);
//! ```

mod equality;
mod length;
mod order;
mod presence;
mod text;

use std::panic::Location;

pub use equality::EqualityConstraints;
pub use length::{LengthConstraints, Measured, Unit};
pub use order::{OrderConstraints, Ordered};
pub use presence::PresenceConstraints;
pub use text::{TextConstraints, TextValue};

use crate::constraint::Constraint;
use crate::validatable::Validatable;

/// Records the outcome of a builder check with its default message.
///
/// `None` stands for an absent value and satisfies the constraint. The
/// origin is the builder's own call to `check`, so a builder declared twice
/// on one path with the same message is reported once, wherever it is called.
#[track_caller]
fn check<T, F>(node: &Validatable<T>, outcome: Option<bool>, message: F) -> Constraint
where
    F: FnOnce() -> String,
{
    node.record(outcome.unwrap_or(true), Location::caller())
        .otherwise(message)
        .with_overridable_message()
}
