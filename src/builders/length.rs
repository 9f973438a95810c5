//! Length constraints for strings and collections.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ops::RangeInclusive;

use indexmap::{IndexMap, IndexSet};

use super::check;
use crate::constraint::Constraint;
use crate::validatable::Validatable;

/// What a [`Measured`] value counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Unicode scalar values of a string.
    Characters,
    /// Elements of a collection.
    Items,
}

/// Values with a length.
pub trait Measured: Copy {
    /// What the length counts; selects the wording of default messages.
    const UNIT: Unit;

    /// The length, or `None` for an absent value.
    fn measure(self) -> Option<usize>;
}

impl Measured for &str {
    const UNIT: Unit = Unit::Characters;

    fn measure(self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Measured for &String {
    const UNIT: Unit = Unit::Characters;

    fn measure(self) -> Option<usize> {
        self.as_str().measure()
    }
}

impl<U> Measured for &[U] {
    const UNIT: Unit = Unit::Items;

    fn measure(self) -> Option<usize> {
        Some(self.len())
    }
}

macro_rules! measured_collection {
    ($( [$($gen:tt)*] $ty:ty ),* $(,)?) => {
        $(
            impl<$($gen)*> Measured for &$ty {
                const UNIT: Unit = Unit::Items;

                fn measure(self) -> Option<usize> {
                    Some(self.len())
                }
            }
        )*
    };
}

measured_collection!(
    [U] Vec<U>,
    [U] VecDeque<U>,
    [U, S] HashSet<U, S>,
    [U] BTreeSet<U>,
    [K, V, S] HashMap<K, V, S>,
    [K, V] BTreeMap<K, V>,
    [K, V, S] IndexMap<K, V, S>,
    [U, S] IndexSet<U, S>,
);

impl<M: Measured> Measured for Option<M> {
    const UNIT: Unit = M::UNIT;

    fn measure(self) -> Option<usize> {
        self.and_then(Measured::measure)
    }
}

fn describe(unit: Unit, relation: &str, bound: impl std::fmt::Display) -> String {
    match unit {
        Unit::Characters => format!("Must contain {relation} {bound} characters"),
        Unit::Items => {
            let relation = match relation {
                "exactly" => "equal to",
                "at least" => "greater than or equal to",
                "at most" => "lower than or equal to",
                "less than" => "lower than",
                "more than" => "greater than",
                other => other,
            };
            format!("The number of items must be {relation} {bound}")
        }
    }
}

/// Length checks for strings and collections.
pub trait LengthConstraints {
    /// The value must have a length of zero.
    fn is_empty(&self) -> Constraint;

    /// The value must not have a length of zero.
    fn is_not_empty(&self) -> Constraint;

    /// The length must be exactly `length`.
    fn has_length_equal_to(&self, length: usize) -> Constraint;

    /// The length must be strictly lower than `length`.
    fn has_length_lower_than(&self, length: usize) -> Constraint;

    /// The length must be lower than or equal to `length`.
    fn has_length_at_most(&self, length: usize) -> Constraint;

    /// The length must be strictly greater than `length`.
    fn has_length_greater_than(&self, length: usize) -> Constraint;

    /// The length must be greater than or equal to `length`.
    fn has_length_at_least(&self, length: usize) -> Constraint;

    /// The length must fall within `range`, bounds included.
    fn has_length_between(&self, range: RangeInclusive<usize>) -> Constraint;
}

impl<T: Measured> LengthConstraints for Validatable<T> {
    fn is_empty(&self) -> Constraint {
        let outcome = self.get().measure().map(|len| len == 0);
        check(self, outcome, || "Must be empty".to_string())
    }

    fn is_not_empty(&self) -> Constraint {
        let outcome = self.get().measure().map(|len| len != 0);
        check(self, outcome, || {
            "Must not be empty".to_string()
        })
    }

    fn has_length_equal_to(&self, length: usize) -> Constraint {
        let outcome = self.get().measure().map(|len| len == length);
        check(self, outcome, || {
            describe(T::UNIT, "exactly", length)
        })
    }

    fn has_length_lower_than(&self, length: usize) -> Constraint {
        let outcome = self.get().measure().map(|len| len < length);
        check(self, outcome, || {
            describe(T::UNIT, "less than", length)
        })
    }

    fn has_length_at_most(&self, length: usize) -> Constraint {
        let outcome = self.get().measure().map(|len| len <= length);
        check(self, outcome, || {
            describe(T::UNIT, "at most", length)
        })
    }

    fn has_length_greater_than(&self, length: usize) -> Constraint {
        let outcome = self.get().measure().map(|len| len > length);
        check(self, outcome, || {
            describe(T::UNIT, "more than", length)
        })
    }

    fn has_length_at_least(&self, length: usize) -> Constraint {
        let outcome = self.get().measure().map(|len| len >= length);
        check(self, outcome, || {
            describe(T::UNIT, "at least", length)
        })
    }

    fn has_length_between(&self, range: RangeInclusive<usize>) -> Constraint {
        let outcome = self.get().measure().map(|len| range.contains(&len));
        check(self, outcome, || {
            describe(
                T::UNIT,
                "between",
                format!("{} and {}", range.start(), range.end()),
            )
        })
    }
}
