//! Ordering constraints for numbers.

use std::fmt::Display;
use std::ops::RangeInclusive;

use serde_json::Value;

use super::check;
use crate::constraint::Constraint;
use crate::validatable::Validatable;

/// Values that can be compared against a bound.
pub trait Ordered: Copy {
    /// The type of the bounds; its default value is zero.
    type Target: PartialOrd + Display + Copy + Default;

    /// The value to compare, or `None` for an absent value.
    fn compared(self) -> Option<Self::Target>;
}

macro_rules! ordered_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl Ordered for $t {
                type Target = $t;

                fn compared(self) -> Option<$t> {
                    Some(self)
                }
            }

            impl Ordered for &$t {
                type Target = $t;

                fn compared(self) -> Option<$t> {
                    Some(*self)
                }
            }
        )*
    };
}

ordered_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// JSON numbers compare as `f64`; other JSON kinds are absent.
impl Ordered for &Value {
    type Target = f64;

    fn compared(self) -> Option<f64> {
        self.as_f64()
    }
}

impl<O: Ordered> Ordered for Option<O> {
    type Target = O::Target;

    fn compared(self) -> Option<O::Target> {
        self.and_then(Ordered::compared)
    }
}

/// Comparisons against fixed bounds.
pub trait OrderConstraints {
    /// The type of the bounds.
    type Bound;

    /// The value must be strictly lower than `bound`.
    fn is_lower_than(&self, bound: Self::Bound) -> Constraint;

    /// The value must be lower than or equal to `bound`.
    fn is_lower_than_or_equal_to(&self, bound: Self::Bound) -> Constraint;

    /// The value must be strictly greater than `bound`.
    fn is_greater_than(&self, bound: Self::Bound) -> Constraint;

    /// The value must be greater than or equal to `bound`.
    fn is_greater_than_or_equal_to(&self, bound: Self::Bound) -> Constraint;

    /// The value must fall within `range`, bounds included.
    fn is_between(&self, range: RangeInclusive<Self::Bound>) -> Constraint;

    /// The value must be strictly greater than zero.
    fn is_positive(&self) -> Constraint;

    /// The value must be strictly lower than zero.
    fn is_negative(&self) -> Constraint;
}

impl<T: Ordered> OrderConstraints for Validatable<T> {
    type Bound = T::Target;

    fn is_lower_than(&self, bound: T::Target) -> Constraint {
        let outcome = self.get().compared().map(|value| value < bound);
        check(self, outcome, || {
            format!("Must be lower than {bound}")
        })
    }

    fn is_lower_than_or_equal_to(&self, bound: T::Target) -> Constraint {
        let outcome = self.get().compared().map(|value| value <= bound);
        check(self, outcome, || {
            format!("Must be lower than or equal to {bound}")
        })
    }

    fn is_greater_than(&self, bound: T::Target) -> Constraint {
        let outcome = self.get().compared().map(|value| value > bound);
        check(self, outcome, || {
            format!("Must be greater than {bound}")
        })
    }

    fn is_greater_than_or_equal_to(&self, bound: T::Target) -> Constraint {
        let outcome = self.get().compared().map(|value| value >= bound);
        check(self, outcome, || {
            format!("Must be greater than or equal to {bound}")
        })
    }

    fn is_between(&self, range: RangeInclusive<T::Target>) -> Constraint {
        let (low, high) = (*range.start(), *range.end());
        let outcome = self
            .get()
            .compared()
            .map(|value| low <= value && value <= high);
        check(self, outcome, || {
            format!("Must be between {low} and {high}")
        })
    }

    fn is_positive(&self) -> Constraint {
        let outcome = self
            .get()
            .compared()
            .map(|value| value > T::Target::default());
        check(self, outcome, || {
            "Must be positive".to_string()
        })
    }

    fn is_negative(&self) -> Constraint {
        let outcome = self
            .get()
            .compared()
            .map(|value| value < T::Target::default());
        check(self, outcome, || {
            "Must be negative".to_string()
        })
    }
}
