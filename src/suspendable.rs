//! The suspending execution mode.
//!
//! [`SuspendableValidator`] mirrors [`Validator`](crate::Validator) for
//! declaration blocks that need to await something, typically an existence
//! check against a repository. Blocks return a boxed future; everything they
//! do with nodes and constraints is identical to the direct mode, and
//! violations are still recorded in program order because one run is only
//! ever driven by the task awaiting it.
//!
//! Dropping a pending [`SuspendableRunner::validate`] future abandons the
//! run without producing a result.
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
//! struct UserRepository;
//!
//! impl UserRepository {
//!     async fn exists_by_handle(&self, handle: &str) -> bool {
//!         handle == "steve"
//!     }
//! }
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let validator = SuspendableValidator::<UserRepository, Registration>::with_context(
//!     |repository, root| {
//!         Box::pin(async move {
//!             let handle = root.field("handle", |r| r.handle.as_str());
//!             handle
//!                 .constrain_async(|h| async move { !repository.exists_by_handle(h).await })
//!                 .await
//!                 .otherwise(|| "This handle is already taken");
//!         })
//!     },
//! );
//!
//! let runner = validator.bind(UserRepository);
//! let result = runner.validate(Registration { handle: "steve".into() }).await;
//! assert!(result.is_failure());
//! # });
//! ```

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::panic::Location;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::Instrument;

use crate::config::Configuration;
use crate::constraint::Constraint;
use crate::validatable::store::ViolationStore;
use crate::validatable::Validatable;
use crate::validator::conclude;
use crate::ValidationResult;

/// The rules a suspendable validator applies to its subject.
pub trait SuspendableDeclaration<C, T, E>: Send + Sync {
    /// Declares constraints against `root`, possibly awaiting along the way.
    fn declare<'a>(
        &'a self,
        context: &'a C,
        root: &'a Validatable<&'a T>,
    ) -> BoxFuture<'a, Result<(), E>>;
}

struct Contextless<F>(F);

impl<T, F> SuspendableDeclaration<(), T, Infallible> for Contextless<F>
where
    F: for<'a> Fn(&'a Validatable<&'a T>) -> BoxFuture<'a, ()> + Send + Sync,
{
    fn declare<'a>(
        &'a self,
        _: &'a (),
        root: &'a Validatable<&'a T>,
    ) -> BoxFuture<'a, Result<(), Infallible>> {
        (self.0)(root).map(Ok).boxed()
    }
}

struct FallibleContextless<F>(F);

impl<T, E, F> SuspendableDeclaration<(), T, E> for FallibleContextless<F>
where
    F: for<'a> Fn(&'a Validatable<&'a T>) -> BoxFuture<'a, Result<(), E>> + Send + Sync,
{
    fn declare<'a>(
        &'a self,
        _: &'a (),
        root: &'a Validatable<&'a T>,
    ) -> BoxFuture<'a, Result<(), E>> {
        (self.0)(root)
    }
}

struct Contextual<F>(F);

impl<C, T, F> SuspendableDeclaration<C, T, Infallible> for Contextual<F>
where
    F: for<'a> Fn(&'a C, &'a Validatable<&'a T>) -> BoxFuture<'a, ()> + Send + Sync,
{
    fn declare<'a>(
        &'a self,
        context: &'a C,
        root: &'a Validatable<&'a T>,
    ) -> BoxFuture<'a, Result<(), Infallible>> {
        (self.0)(context, root).map(Ok).boxed()
    }
}

struct FallibleContextual<F>(F);

impl<C, T, E, F> SuspendableDeclaration<C, T, E> for FallibleContextual<F>
where
    F: for<'a> Fn(&'a C, &'a Validatable<&'a T>) -> BoxFuture<'a, Result<(), E>> + Send + Sync,
{
    fn declare<'a>(
        &'a self,
        context: &'a C,
        root: &'a Validatable<&'a T>,
    ) -> BoxFuture<'a, Result<(), E>> {
        (self.0)(context, root)
    }
}

/// A reusable validation specification whose block may suspend.
pub struct SuspendableValidator<C, T, E = Infallible> {
    declaration: Arc<dyn SuspendableDeclaration<C, T, E>>,
    configuration: Configuration,
}

impl<T> SuspendableValidator<(), T> {
    /// Creates a suspendable validator without context.
    pub fn new<F>(block: F) -> Self
    where
        F: for<'a> Fn(&'a Validatable<&'a T>) -> BoxFuture<'a, ()> + Send + Sync + 'static,
    {
        Self::from_declaration(Contextless(block))
    }

    /// Validates `subject`.
    pub async fn validate(&self, subject: T) -> ValidationResult<T> {
        self.runner().validate(subject).await
    }
}

impl<T, E> SuspendableValidator<(), T, E> {
    /// Creates a suspendable validator without context whose block may fail.
    pub fn try_new<F>(block: F) -> Self
    where
        F: for<'a> Fn(&'a Validatable<&'a T>) -> BoxFuture<'a, Result<(), E>>
            + Send
            + Sync
            + 'static,
    {
        Self::from_declaration(FallibleContextless(block))
    }

    /// Returns a runner for the context-free validator.
    pub fn runner(&self) -> SuspendableRunner<(), T, E> {
        self.bind(())
    }

    /// Validates `subject`, propagating the block's error.
    pub async fn try_validate(&self, subject: T) -> Result<ValidationResult<T>, E> {
        self.runner().try_validate(subject).await
    }
}

impl<C, T> SuspendableValidator<C, T> {
    /// Creates a suspendable validator whose block receives a context.
    pub fn with_context<F>(block: F) -> Self
    where
        F: for<'a> Fn(&'a C, &'a Validatable<&'a T>) -> BoxFuture<'a, ()> + Send + Sync + 'static,
    {
        Self::from_declaration(Contextual(block))
    }
}

impl<C, T, E> SuspendableValidator<C, T, E> {
    /// Creates a suspendable validator whose block receives a context and may fail.
    pub fn try_with_context<F>(block: F) -> Self
    where
        F: for<'a> Fn(&'a C, &'a Validatable<&'a T>) -> BoxFuture<'a, Result<(), E>>
            + Send
            + Sync
            + 'static,
    {
        Self::from_declaration(FallibleContextual(block))
    }

    /// Creates a suspendable validator from a [`SuspendableDeclaration`] implementation.
    pub fn from_declaration<D>(declaration: D) -> Self
    where
        D: SuspendableDeclaration<C, T, E> + 'static,
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
    pub fn bind(&self, context: C) -> SuspendableRunner<C, T, E> {
        SuspendableRunner {
            declaration: Arc::clone(&self.declaration),
            context,
            configuration: self.configuration.clone(),
        }
    }
}

impl<C, T, E> Clone for SuspendableValidator<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            declaration: Arc::clone(&self.declaration),
            configuration: self.configuration.clone(),
        }
    }
}

impl<C, T, E> fmt::Debug for SuspendableValidator<C, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendableValidator")
            .field("subject", &type_name::<T>())
            .field("configuration", &self.configuration)
            .finish()
    }
}

/// A suspendable validator bound to its context.
pub struct SuspendableRunner<C, T, E = Infallible> {
    declaration: Arc<dyn SuspendableDeclaration<C, T, E>>,
    context: C,
    configuration: Configuration,
}

impl<C, T, E> SuspendableRunner<C, T, E> {
    /// The bound context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Validates `subject`, propagating the block's error.
    ///
    /// # Errors
    ///
    /// Returns the error of a fallible declaration block untouched.
    pub async fn try_validate(&self, subject: T) -> Result<ValidationResult<T>, E> {
        let span = tracing::debug_span!("validation_run", subject = type_name::<T>());

        let store = ViolationStore::new();
        let root = Validatable::new(
            &subject,
            self.configuration.root_path().clone(),
            store.clone(),
        );
        let outcome = self
            .declaration
            .declare(&self.context, &root)
            .instrument(span.clone())
            .await;
        drop(root);

        let violations = store.complete(self.configuration.default_violation_message());
        outcome?;
        Ok(span.in_scope(|| conclude(subject, violations)))
    }

    /// Runs the declaration block against an existing node of another run.
    ///
    /// # Errors
    ///
    /// Returns the error of a fallible declaration block untouched.
    pub fn apply_to<'a>(&'a self, node: &'a Validatable<&'a T>) -> BoxFuture<'a, Result<(), E>> {
        self.declaration.declare(&self.context, node)
    }
}

impl<C, T> SuspendableRunner<C, T> {
    /// Validates `subject`.
    pub async fn validate(&self, subject: T) -> ValidationResult<T> {
        match self.try_validate(subject).await {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl<C: Clone, T, E> Clone for SuspendableRunner<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            declaration: Arc::clone(&self.declaration),
            context: self.context.clone(),
            configuration: self.configuration.clone(),
        }
    }
}

impl<C: fmt::Debug, T, E> fmt::Debug for SuspendableRunner<C, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendableRunner")
            .field("subject", &type_name::<T>())
            .field("context", &self.context)
            .field("configuration", &self.configuration)
            .finish()
    }
}

impl<'v, T> Validatable<&'v T> {
    /// Applies a suspendable validator's rules to this node.
    pub async fn validate_with_async<C>(&self, runner: &SuspendableRunner<C, T>) {
        match runner.apply_to(self).await {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Applies a suspendable validator's fallible rules to this node.
    ///
    /// # Errors
    ///
    /// Returns the nested block's error untouched.
    pub async fn try_validate_with_async<C, E>(
        &self,
        runner: &SuspendableRunner<C, T, E>,
    ) -> Result<(), E> {
        runner.apply_to(self).await
    }
}

impl<T: Copy> Validatable<T> {
    /// Evaluates an asynchronous predicate against the value.
    ///
    /// The predicate is called right away; the returned future resolves to
    /// the [`Constraint`] once its outcome is known.
    ///
    /// # Panics
    ///
    /// The future panics if the run completed before it resolved.
    #[track_caller]
    pub fn constrain_async<'a, F, Fut>(&'a self, predicate: F) -> impl Future<Output = Constraint> + 'a
    where
        F: FnOnce(T) -> Fut + 'a,
        Fut: Future<Output = bool> + 'a,
    {
        let origin = Location::caller();
        let pending = predicate(self.get());
        async move {
            let satisfied = pending.await;
            self.record(satisfied, origin)
        }
    }
}
