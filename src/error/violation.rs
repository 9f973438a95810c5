//! Constraint violation types.
//!
//! This module provides [`ConstraintViolation`] for a single failed constraint
//! and [`ConstraintViolationSet`] for the ordered, non-empty list carried by a
//! failed validation run.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{json, Value};
use stillwater::prelude::*;

use crate::path::Path;

/// A single failed constraint with the path it applies to.
///
/// # Example
///
/// ```rust
/// use scrutiny::{ConstraintViolation, Path};
///
/// let violation = ConstraintViolation::new(
///     Path::root().append("handle"),
///     "Must contain at least 5 characters",
/// );
///
/// assert_eq!(violation.to_string(), "handle: Must contain at least 5 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintViolation {
    /// The path to the value that failed validation.
    pub path: Path,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ConstraintViolation {
    /// Creates a new violation with the given path and message.
    pub fn new(path: Path, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Returns the violation as a JSON object with `path`, `segments` and `message` keys.
    pub fn to_json(&self) -> Value {
        json!({
            "path": self.path.to_string(),
            "segments": self.path.segments().collect::<Vec<_>>(),
            "message": self.message,
        })
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ConstraintViolation {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConstraintViolation>();
    assert_sync::<ConstraintViolation>();
};

/// A non-empty, ordered collection of constraint violations.
///
/// `ConstraintViolationSet` wraps a `NonEmptyVec<ConstraintViolation>` so a
/// failed [`ValidationResult`](crate::ValidationResult) always carries at
/// least one violation. Violations keep the order in which their constraints
/// were first registered during the run.
///
/// # Combining Violations
///
/// `ConstraintViolationSet` implements `Semigroup`, so the failures of several
/// independent runs can be merged:
///
/// ```rust
/// use scrutiny::{ConstraintViolation, ConstraintViolationSet, Path};
/// use stillwater::prelude::*;
///
/// let first = ConstraintViolationSet::single(
///     ConstraintViolation::new(Path::root().append("name"), "Must not be empty")
/// );
/// let second = ConstraintViolationSet::single(
///     ConstraintViolation::new(Path::root().append("email"), "Must not be blank")
/// );
///
/// assert_eq!(first.combine(second).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolationSet(NonEmptyVec<ConstraintViolation>);

impl ConstraintViolationSet {
    /// Creates a set containing a single violation.
    pub fn single(violation: ConstraintViolation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Creates a set from a `NonEmptyVec` of violations.
    pub fn from_non_empty(violations: NonEmptyVec<ConstraintViolation>) -> Self {
        Self(violations)
    }

    /// Creates a set from a `Vec`, or `None` when the vec is empty.
    pub fn from_vec(violations: Vec<ConstraintViolation>) -> Option<Self> {
        NonEmptyVec::from_vec(violations).map(Self)
    }

    /// Returns the number of violations in this set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a violation set is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the violations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.0.iter()
    }

    /// Returns all violations at the specified path.
    pub fn at_path(&self, path: &Path) -> Vec<&ConstraintViolation> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Groups the messages by path, keeping the order in which paths first failed.
    pub fn by_path(&self) -> IndexMap<Path, Vec<&str>> {
        let mut grouped: IndexMap<Path, Vec<&str>> = IndexMap::new();
        for violation in self.0.iter() {
            grouped
                .entry(violation.path.clone())
                .or_default()
                .push(violation.message.as_str());
        }
        grouped
    }

    /// Returns the first registered violation.
    pub fn first(&self) -> &ConstraintViolation {
        self.0.head()
    }

    /// Converts this set into a `Vec<ConstraintViolation>`.
    pub fn into_vec(self) -> Vec<ConstraintViolation> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<ConstraintViolation> {
        &self.0
    }

    /// Renders the set as a JSON array, one object per violation.
    pub fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(ConstraintViolation::to_json).collect())
    }
}

impl Semigroup for ConstraintViolationSet {
    fn combine(self, other: Self) -> Self {
        ConstraintViolationSet(self.0.combine(other.0))
    }
}

impl Display for ConstraintViolationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConstraintViolationSet {}

impl IntoIterator for ConstraintViolationSet {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolationSet {
    type Item = &'a ConstraintViolation;
    type IntoIter = Box<dyn Iterator<Item = &'a ConstraintViolation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConstraintViolationSet>();
    assert_sync::<ConstraintViolationSet>();
};
