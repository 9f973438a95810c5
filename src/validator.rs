//! Validators: reusable declaration blocks and the runs that execute them.
//!
//! A [`Validator`] holds a declaration block and no per-run state. Binding it
//! to a context yields a [`Runner`]; every call to [`Runner::validate`]
//! allocates a fresh root node and violation collection, runs the block
//! against them and turns the collected violations into a
//! [`ValidationResult`].
//!
//! # Example
//!
//! ```rust
//! use scrutiny::prelude::*;
//!
//! #[derive(Debug)]
//! struct Registration {
//!     handle: String,
//! }
//!
//! struct UserRepository {
//!     taken: Vec<String>,
//! }
//!
//! impl UserRepository {
//!     fn exists_by_handle(&self, handle: &str) -> bool {
//!         self.taken.iter().any(|h| h == handle)
//!     }
//! }
//!
//! let validator = Validator::with_context(
//!     |repository: &UserRepository, root: &Validatable<&Registration>| {
//!         let handle = root.field("handle", |r| r.handle.as_str());
//!         if handle.has_length_at_least(5).satisfied() {
//!             handle
//!                 .constrain(|h| !repository.exists_by_handle(h))
//!                 .otherwise(|| "This handle is already taken");
//!         }
//!     },
//! );
//!
//! let runner = validator.bind(UserRepository { taken: vec!["steve".into()] });
//! assert!(runner.validate(Registration { handle: "alice".into() }).is_success());
//! assert!(runner.validate(Registration { handle: "steve".into() }).is_failure());
//! ```

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use stillwater::Validation;

use crate::config::Configuration;
use crate::error::{ConstraintViolation, ConstraintViolationSet};
use crate::validatable::store::ViolationStore;
use crate::validatable::Validatable;
use crate::ValidationResult;

/// The rules a validator applies to its subject.
///
/// Closures passed to the [`Validator`] constructors are wrapped into a
/// `Declaration`; implement it directly to give a rule set its own type.
pub trait Declaration<C, T, E>: Send + Sync {
    /// Declares constraints against `root`, with access to the bound context.
    fn declare(&self, context: &C, root: &Validatable<&T>) -> Result<(), E>;
}

struct Contextless<F>(F);

impl<T, F> Declaration<(), T, Infallible> for Contextless<F>
where
    F: Fn(&Validatable<&T>) + Send + Sync,
{
    fn declare(&self, _: &(), root: &Validatable<&T>) -> Result<(), Infallible> {
        (self.0)(root);
        Ok(())
    }
}

struct FallibleContextless<F>(F);

impl<T, E, F> Declaration<(), T, E> for FallibleContextless<F>
where
    F: Fn(&Validatable<&T>) -> Result<(), E> + Send + Sync,
{
    fn declare(&self, _: &(), root: &Validatable<&T>) -> Result<(), E> {
        (self.0)(root)
    }
}

struct Contextual<F>(F);

impl<C, T, F> Declaration<C, T, Infallible> for Contextual<F>
where
    F: Fn(&C, &Validatable<&T>) + Send + Sync,
{
    fn declare(&self, context: &C, root: &Validatable<&T>) -> Result<(), Infallible> {
        (self.0)(context, root);
        Ok(())
    }
}

struct FallibleContextual<F>(F);

impl<C, T, E, F> Declaration<C, T, E> for FallibleContextual<F>
where
    F: Fn(&C, &Validatable<&T>) -> Result<(), E> + Send + Sync,
{
    fn declare(&self, context: &C, root: &Validatable<&T>) -> Result<(), E> {
        (self.0)(context, root)
    }
}

/// A reusable validation specification.
///
/// `C` is the context type made available to the block (`()` when there is
/// none), `T` the validated subject and `E` the error a fallible block may
/// return.
pub struct Validator<C, T, E = Infallible> {
    declaration: Arc<dyn Declaration<C, T, E>>,
    configuration: Configuration,
}

impl<T> Validator<(), T> {
    /// Creates a validator without context.
    pub fn new<F>(block: F) -> Self
    where
        F: Fn(&Validatable<&T>) + Send + Sync + 'static,
    {
        Self::from_declaration(Contextless(block))
    }

    /// Validates `subject`.
    pub fn validate(&self, subject: T) -> ValidationResult<T> {
        self.runner().validate(subject)
    }
}

impl<T, E> Validator<(), T, E> {
    /// Creates a validator without context whose block may fail.
    pub fn try_new<F>(block: F) -> Self
    where
        F: Fn(&Validatable<&T>) -> Result<(), E> + Send + Sync + 'static,
    {
        Self::from_declaration(FallibleContextless(block))
    }

    /// Returns a runner for the context-free validator.
    pub fn runner(&self) -> Runner<(), T, E> {
        self.bind(())
    }

    /// Validates `subject`, propagating the block's error.
    pub fn try_validate(&self, subject: T) -> Result<ValidationResult<T>, E> {
        self.runner().try_validate(subject)
    }
}

impl<C, T> Validator<C, T> {
    /// Creates a validator whose block receives a context.
    pub fn with_context<F>(block: F) -> Self
    where
        F: Fn(&C, &Validatable<&T>) + Send + Sync + 'static,
    {
        Self::from_declaration(Contextual(block))
    }
}

impl<C, T, E> Validator<C, T, E> {
    /// Creates a validator whose block receives a context and may fail.
    pub fn try_with_context<F>(block: F) -> Self
    where
        F: Fn(&C, &Validatable<&T>) -> Result<(), E> + Send + Sync + 'static,
    {
        Self::from_declaration(FallibleContextual(block))
    }

    /// Creates a validator from a [`Declaration`] implementation.
    pub fn from_declaration<D>(declaration: D) -> Self
    where
        D: Declaration<C, T, E> + 'static,
    {
        Self {
            declaration: Arc::new(declaration),
            configuration: Configuration::default(),
        }
    }

    /// Replaces the configuration used by runners created afterwards.
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// The configuration of this validator.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Binds a context, producing a reusable runner.
    pub fn bind(&self, context: C) -> Runner<C, T, E> {
        Runner {
            declaration: Arc::clone(&self.declaration),
            context,
            configuration: self.configuration.clone(),
        }
    }
}

impl<C, T, E> Clone for Validator<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            declaration: Arc::clone(&self.declaration),
            configuration: self.configuration.clone(),
        }
    }
}

impl<C, T, E> fmt::Debug for Validator<C, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("subject", &type_name::<T>())
            .field("configuration", &self.configuration)
            .finish()
    }
}

/// A validator bound to its context.
///
/// Runners are cheap to clone and can be shared between threads; runs never
/// share nodes or violations with each other.
pub struct Runner<C, T, E = Infallible> {
    declaration: Arc<dyn Declaration<C, T, E>>,
    context: C,
    configuration: Configuration,
}

impl<C, T, E> Runner<C, T, E> {
    /// The bound context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Validates `subject`, propagating the block's error.
    ///
    /// No result is produced when the block fails; the run is discarded.
    ///
    /// # Errors
    ///
    /// Returns the error of a fallible declaration block untouched.
    pub fn try_validate(&self, subject: T) -> Result<ValidationResult<T>, E> {
        let span = tracing::debug_span!("validation_run", subject = type_name::<T>());
        let _entered = span.enter();

        let store = ViolationStore::new();
        let root = Validatable::new(
            &subject,
            self.configuration.root_path().clone(),
            store.clone(),
        );
        let outcome = self.declaration.declare(&self.context, &root);
        drop(root);

        let violations = store.complete(self.configuration.default_violation_message());
        outcome?;
        Ok(conclude(subject, violations))
    }

    /// Runs the declaration block against an existing node of another run.
    ///
    /// Violations land in that node's run, below its path.
    ///
    /// # Errors
    ///
    /// Returns the error of a fallible declaration block untouched.
    pub fn apply_to(&self, node: &Validatable<&T>) -> Result<(), E> {
        self.declaration.declare(&self.context, node)
    }
}

impl<C, T> Runner<C, T> {
    /// Validates `subject`.
    pub fn validate(&self, subject: T) -> ValidationResult<T> {
        match self.try_validate(subject) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl<C: Clone, T, E> Clone for Runner<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            declaration: Arc::clone(&self.declaration),
            context: self.context.clone(),
            configuration: self.configuration.clone(),
        }
    }
}

impl<C: fmt::Debug, T, E> fmt::Debug for Runner<C, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("subject", &type_name::<T>())
            .field("context", &self.context)
            .field("configuration", &self.configuration)
            .finish()
    }
}

impl<'v, T> Validatable<&'v T> {
    /// Applies another validator's rules to this node.
    pub fn validate_with<C>(&self, runner: &Runner<C, T>) {
        match runner.apply_to(self) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Applies another validator's fallible rules to this node.
    ///
    /// # Errors
    ///
    /// Returns the nested block's error untouched.
    pub fn try_validate_with<C, E>(&self, runner: &Runner<C, T, E>) -> Result<(), E> {
        runner.apply_to(self)
    }
}

/// Turns the violations of a completed run into its result.
pub(crate) fn conclude<T>(subject: T, violations: Vec<ConstraintViolation>) -> ValidationResult<T> {
    match ConstraintViolationSet::from_vec(violations) {
        None => {
            tracing::debug!("validation succeeded");
            Validation::Success(subject)
        }
        Some(violations) => {
            tracing::debug!(violations = violations.len(), "validation failed");
            Validation::Failure(violations)
        }
    }
}
