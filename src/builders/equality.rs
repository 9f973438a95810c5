//! Equality constraints.

use std::fmt::Debug;

use super::check;
use crate::constraint::Constraint;
use crate::validatable::{Present, Validatable};

/// Comparisons against a fixed value.
pub trait EqualityConstraints<X> {
    /// The value must equal `other`.
    fn is_equal_to(&self, other: X) -> Constraint;

    /// The value must differ from `other`.
    fn is_not_equal_to(&self, other: X) -> Constraint;
}

impl<T, X> EqualityConstraints<X> for Validatable<T>
where
    T: Present,
    T::Inner: PartialEq<X>,
    X: Debug,
{
    fn is_equal_to(&self, other: X) -> Constraint {
        let outcome = self.get().present().map(|value| value == other);
        check(self, outcome, || {
            format!("Must be equal to {other:?}")
        })
    }

    fn is_not_equal_to(&self, other: X) -> Constraint {
        let outcome = self.get().present().map(|value| value != other);
        check(self, outcome, || {
            format!("Must be different from {other:?}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use crate::validatable::store::ViolationStore;

    fn node<T>(value: T) -> Validatable<T> {
        Validatable::new(value, Path::root(), ViolationStore::new())
    }

    #[test]
    fn test_equal() {
        assert!(node(3).is_equal_to(3).satisfied());
        let failed = node("draft").is_equal_to("published");
        assert!(!failed.satisfied());
        assert_eq!(failed.message(), Some("Must be equal to \"published\""));
    }

    #[test]
    fn test_not_equal() {
        let status = String::from("draft");
        assert!(node(&status).is_not_equal_to("archived").satisfied());
        assert_eq!(
            node(&status).is_not_equal_to("draft").message(),
            Some("Must be different from \"draft\"")
        );
    }

    #[test]
    fn test_absent_value_is_skipped() {
        assert!(node(None::<i32>).is_equal_to(1).satisfied());
        assert!(!node(Some(2)).is_equal_to(1).satisfied());
    }
}
