//! Text constraints.

use regex::Regex;
use serde_json::Value;

use super::check;
use crate::constraint::Constraint;
use crate::validatable::Validatable;

/// Values that can be read as text.
///
/// JSON values are text only when they are strings; any other JSON kind,
/// `null` included, is treated as absent.
pub trait TextValue: Copy {
    /// Runs `f` on the text, or returns `None` for an absent value.
    fn with_text<R>(self, f: impl FnOnce(&str) -> R) -> Option<R>;
}

impl TextValue for &str {
    fn with_text<R>(self, f: impl FnOnce(&str) -> R) -> Option<R> {
        Some(f(self))
    }
}

impl TextValue for &String {
    fn with_text<R>(self, f: impl FnOnce(&str) -> R) -> Option<R> {
        Some(f(self))
    }
}

impl TextValue for &Value {
    fn with_text<R>(self, f: impl FnOnce(&str) -> R) -> Option<R> {
        self.as_str().map(f)
    }
}

impl<T: TextValue> TextValue for Option<T> {
    fn with_text<R>(self, f: impl FnOnce(&str) -> R) -> Option<R> {
        self.and_then(|text| text.with_text(f))
    }
}

/// Content checks for text.
pub trait TextConstraints {
    /// The text must contain at least one non-whitespace character.
    fn is_not_blank(&self) -> Constraint;

    /// The text must match `pattern` somewhere; anchor it to match the whole text.
    fn matches(&self, pattern: &Regex) -> Constraint;

    /// The text must start with `prefix`.
    fn starts_with(&self, prefix: &str) -> Constraint;

    /// The text must end with `suffix`.
    fn ends_with(&self, suffix: &str) -> Constraint;

    /// The text must contain `needle`.
    fn contains(&self, needle: &str) -> Constraint;
}

impl<T: TextValue> TextConstraints for Validatable<T> {
    fn is_not_blank(&self) -> Constraint {
        let outcome = self.get().with_text(|text| !text.trim().is_empty());
        check(self, outcome, || {
            "Must not be blank".to_string()
        })
    }

    fn matches(&self, pattern: &Regex) -> Constraint {
        let outcome = self.get().with_text(|text| pattern.is_match(text));
        check(self, outcome, || {
            format!("Must match the following pattern: {}", pattern.as_str())
        })
    }

    fn starts_with(&self, prefix: &str) -> Constraint {
        let outcome = self.get().with_text(|text| text.starts_with(prefix));
        check(self, outcome, || {
            format!("Must start with \"{prefix}\"")
        })
    }

    fn ends_with(&self, suffix: &str) -> Constraint {
        let outcome = self.get().with_text(|text| text.ends_with(suffix));
        check(self, outcome, || {
            format!("Must end with \"{suffix}\"")
        })
    }

    fn contains(&self, needle: &str) -> Constraint {
        let outcome = self.get().with_text(|text| text.contains(needle));
        check(self, outcome, || {
            format!("Must contain \"{needle}\"")
        })
    }
}
