//! Presence constraints for optional values.

use super::check;
use crate::constraint::Constraint;
use crate::validatable::Validatable;

/// Checks on whether an optional value is set.
pub trait PresenceConstraints {
    /// The value must be absent.
    fn is_none(&self) -> Constraint;

    /// The value must be present.
    fn is_some(&self) -> Constraint;
}

impl<U: Copy> PresenceConstraints for Validatable<Option<U>> {
    fn is_none(&self) -> Constraint {
        let outcome = Some(self.get().is_none());
        check(self, outcome, || "Must be null".to_string())
    }

    fn is_some(&self) -> Constraint {
        let outcome = Some(self.get().is_some());
        check(self, outcome, || {
            "Must not be null".to_string()
        })
    }
}
