//! # Scrutiny
//!
//! A validation DSL that reports every violated constraint of a value,
//! each with the path of the field it concerns.
//!
//! ## Overview
//!
//! A [`Validator`] wraps a declaration block. The block receives the root
//! [`Validatable`] of the subject, derives nodes for its fields and declares
//! [`Constraint`]s on them. Unsatisfied constraints are collected in
//! declaration order, without duplicates, and returned as a
//! [`ConstraintViolationSet`] inside stillwater's `Validation` type.
//!
//! Constraints are evaluated eagerly, so their outcome can gate later
//! declarations. That is how conditional rules are written: skip the
//! repository lookup when the handle is already too short.
//!
//! ## Core Types
//!
//! - [`Path`]: the field path of a node, e.g. `address.city`
//! - [`Validatable`]: a value under validation, with its path
//! - [`Constraint`]: the outcome of one predicate, messaged with [`Constraint::otherwise`]
//! - [`Validator`] / [`Runner`]: the reusable rules, and the rules bound to a context
//! - [`SuspendableValidator`] / [`SuspendableRunner`]: the same for blocks that await
//! - [`ConstraintViolationSet`]: the non-empty result of a failed run
//!
//! ## Example
//!
//! ```rust
//! use scrutiny::prelude::*;
//!
//! #[derive(Debug)]
//! struct Library {
//!     books: Vec<Book>,
//!     capacity: u32,
//! }
//!
//! #[derive(Debug)]
//! struct Book {
//!     title: String,
//! }
//!
//! let validator = Validator::new(|root: &Validatable<&Library>| {
//!     let books = root.field("books", |l| &l.books);
//!     let capacity = root.field("capacity", |l| l.capacity);
//!
//!     books.each(|book| {
//!         book.field("title", |b| b.title.as_str()).is_not_empty();
//!     });
//!     books
//!         .constrain(|b| b.len() <= capacity.get() as usize)
//!         .otherwise(|| "The library is full");
//! });
//!
//! let library = Library {
//!     books: vec![Book { title: String::new() }],
//!     capacity: 0,
//! };
//! let violations = validator.validate(library).into_result().unwrap_err();
//!
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations.first().path.to_string(), "books.title");
//! assert_eq!(violations.first().message, "Must not be empty");
//! ```

mod accessors;
pub mod builders;
pub mod config;
pub mod constraint;
pub mod error;
pub mod json;
pub mod path;
pub mod prelude;
pub mod suspendable;
pub mod validatable;
pub mod validator;

#[cfg(feature = "parallel")]
mod batch;

pub use config::Configuration;
pub use constraint::Constraint;
pub use error::{ConstraintViolation, ConstraintViolationSet, MisuseError};
pub use path::Path;
pub use suspendable::{SuspendableDeclaration, SuspendableRunner, SuspendableValidator};
pub use validatable::{Compound, Present, Validatable};
pub use validator::{Declaration, Runner, Validator};

/// Type alias for validation results using ConstraintViolationSet
pub type ValidationResult<T> = stillwater::Validation<T, ConstraintViolationSet>;
