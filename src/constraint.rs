//! Constraints: the outcome of one predicate evaluated against a node.
//!
//! A [`Constraint`] is created by [`Validatable::constrain`](crate::Validatable::constrain)
//! and its relatives. An unsatisfied constraint is registered in the run's
//! violation collection as soon as it is created; [`Constraint::otherwise`]
//! then attaches the message reported to the caller.

use std::panic::Location;

use crate::error::MisuseError;
use crate::path::Path;
use crate::validatable::store::{ConstraintDescriptor, ViolationStore};

/// The result of evaluating one predicate against a node.
///
/// The satisfied flag is fixed at creation. It can gate later declarations,
/// which is how conditional constraints are written:
///
/// ```rust
/// use scrutiny::prelude::*;
///
/// #[derive(Debug)]
/// struct Signup {
///     handle: String,
/// }
///
/// let taken = ["steve"];
/// let validator = Validator::new(move |root: &Validatable<&Signup>| {
///     let handle = root.field("handle", |s| s.handle.as_str());
///     if handle.has_length_at_least(5).satisfied() {
///         handle
///             .constrain(|h| !taken.contains(&h))
///             .otherwise(|| "This handle is already taken");
///     }
/// });
///
/// let result = validator.validate(Signup { handle: "n".into() });
/// let violations = result.into_result().unwrap_err();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations.first().message, "Must contain at least 5 characters");
/// ```
///
/// A constraint is not `Clone`: it stands for one declaration, and its
/// message can only be attached once.
///
/// ```compile_fail
/// use scrutiny::prelude::*;
///
/// let validator = Validator::new(|root: &Validatable<&u32>| {
///     let constraint = root.constrain(|age| *age >= 18);
///     let copy = constraint.clone();
///     constraint.otherwise(|| "first");
///     copy.otherwise(|| "second");
/// });
/// ```
#[derive(Debug)]
pub struct Constraint {
    satisfied: bool,
    path: Path,
    message: Option<String>,
    overridable: bool,
    origin: &'static Location<'static>,
    store: ViolationStore,
    /// Whether the pending violation was inserted by this constraint.
    owned: bool,
}

impl Constraint {
    /// Builds a constraint and registers it when unsatisfied.
    pub(crate) fn evaluate(
        satisfied: bool,
        path: &Path,
        store: &ViolationStore,
        origin: &'static Location<'static>,
    ) -> Result<Self, MisuseError> {
        store.ensure_open(path)?;

        let owned = !satisfied
            && store.insert(ConstraintDescriptor {
                path: path.clone(),
                message: None,
                origin: Some(origin),
            })?;

        Ok(Self {
            satisfied,
            path: path.clone(),
            message: None,
            overridable: false,
            origin,
            store: store.clone(),
            owned,
        })
    }

    /// Whether the predicate held.
    pub fn satisfied(&self) -> bool {
        self.satisfied
    }

    /// The path of the node the constraint was declared against.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The message attached by [`otherwise`](Self::otherwise), if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Source location of the declaring call.
    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    pub(crate) fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            path: self.path.clone(),
            message: self.message.clone(),
            origin: Some(self.origin),
        }
    }

    /// Lets a later `otherwise` replace the current message instead of conflicting with it.
    pub(crate) fn with_overridable_message(mut self) -> Self {
        self.overridable = self.message.is_some();
        self
    }

    pub(crate) fn belongs_to(&self, store: &ViolationStore) -> bool {
        self.store.same_run(store)
    }

    /// Attaches a message to an unsatisfied constraint.
    ///
    /// The message supplier is only invoked when the constraint is not
    /// satisfied. The violation keeps the position it was first registered at.
    /// The default message of a constraint builder is replaced.
    ///
    /// # Panics
    ///
    /// Panics on the misuse cases described by [`try_otherwise`](Self::try_otherwise).
    pub fn otherwise<F, S>(self, message: F) -> Constraint
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self.try_otherwise(message) {
            Ok(constraint) => constraint,
            Err(misuse) => {
                tracing::warn!(%misuse, "declaration misuse");
                panic!("{misuse}")
            }
        }
    }

    /// Attaches a message to an unsatisfied constraint.
    ///
    /// # Errors
    ///
    /// Returns [`MisuseError::ConflictingMessage`] if a different message was
    /// already attached by `otherwise`, and [`MisuseError::RunCompleted`] if the run that
    /// created the constraint is over.
    pub fn try_otherwise<F, S>(mut self, message: F) -> Result<Constraint, MisuseError>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        if self.satisfied {
            return Ok(self);
        }

        let message = message().into();
        if let Some(existing) = &self.message {
            if *existing == message {
                return Ok(self);
            }
            if !self.overridable {
                return Err(MisuseError::ConflictingMessage {
                    path: self.path.clone(),
                    existing: existing.clone(),
                    attempted: message,
                });
            }
        }

        let current = self.descriptor();
        let messaged = ConstraintDescriptor {
            message: Some(message.clone()),
            ..current.clone()
        };
        self.owned = self.store.attach_message(&current, self.owned, messaged)?;

        self.message = Some(message);
        self.overridable = false;
        Ok(self)
    }
}

impl From<&Constraint> for bool {
    fn from(constraint: &Constraint) -> bool {
        constraint.satisfied
    }
}

impl From<Constraint> for bool {
    fn from(constraint: Constraint) -> bool {
        constraint.satisfied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint(satisfied: bool, store: &ViolationStore) -> Constraint {
        Constraint::evaluate(satisfied, &Path::root().append("age"), store, Location::caller())
            .unwrap()
    }

    #[test]
    fn test_satisfied_constraint_is_not_registered() {
        let store = ViolationStore::new();
        let c = constraint(true, &store);

        assert!(c.satisfied());
        assert!(bool::from(&c));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_unsatisfied_constraint_registers_itself() {
        let store = ViolationStore::new();
        let c = constraint(false, &store);

        assert!(!c.satisfied());
        assert_eq!(c.message(), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.complete("The value is invalid.")[0].message, "The value is invalid.");
    }

    #[test]
    fn test_otherwise_skips_supplier_when_satisfied() {
        let store = ViolationStore::new();
        let c = constraint(true, &store).otherwise(|| -> String { panic!("must not be called") });
        assert_eq!(c.message(), None);
    }

    #[test]
    fn test_otherwise_replaces_pending_violation() {
        let store = ViolationStore::new();
        let c = constraint(false, &store).otherwise(|| "Must be adult");

        assert_eq!(c.message(), Some("Must be adult"));
        let violations = store.complete("default");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Must be adult");
    }

    #[test]
    fn test_otherwise_same_message_twice_is_idempotent() {
        let store = ViolationStore::new();
        let c = constraint(false, &store)
            .otherwise(|| "Must be adult")
            .otherwise(|| "Must be adult");

        assert_eq!(c.message(), Some("Must be adult"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_otherwise_conflicting_message_is_misuse() {
        let store = ViolationStore::new();
        let err = constraint(false, &store)
            .otherwise(|| "first")
            .try_otherwise(|| "second")
            .unwrap_err();

        assert!(matches!(err, MisuseError::ConflictingMessage { .. }));
    }

    #[test]
    fn test_otherwise_replaces_builder_message() {
        let store = ViolationStore::new();
        let c = constraint(false, &store)
            .otherwise(|| "Must be positive")
            .with_overridable_message()
            .otherwise(|| "Age must be positive");

        assert_eq!(c.message(), Some("Age must be positive"));
        let violations = store.complete("default");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Age must be positive");
    }

    #[test]
    fn test_otherwise_after_completion_is_misuse() {
        let store = ViolationStore::new();
        let c = constraint(false, &store);
        store.complete("default");

        let err = c.try_otherwise(|| "late").unwrap_err();
        assert!(matches!(err, MisuseError::RunCompleted { .. }));
    }
}
