//! Traversal of untyped JSON payloads.
//!
//! Payloads that never get a Rust type can still be validated: `key` derives
//! a named child for an object member and `elements` iterates over an array.
//! Missing members and non-object receivers produce absent children, which
//! the constraint builders skip.
//!
//! ```rust
//! use scrutiny::prelude::*;
//! use serde_json::{json, Value};
//!
//! let validator = Validator::new(|root: &Validatable<&Value>| {
//!     let user = root.key("user");
//!     user.key("name").is_not_blank();
//!     user.key("age").is_greater_than_or_equal_to(18.0);
//! });
//!
//! let violations = validator
//!     .validate(json!({ "user": { "name": "", "age": 12 } }))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations.first().path.to_string(), "user.name");
//! ```

use serde_json::Value;

use crate::validatable::Validatable;

impl<'v> Validatable<&'v Value> {
    /// Derives the child for object member `name`; absent unless `self` is an object holding it.
    pub fn key(&self, name: &str) -> Validatable<Option<&'v Value>> {
        self.derive(Some(name), self.get().get(name))
    }

    /// Iterates over the elements of an array; any other value yields nothing.
    ///
    /// Elements keep this node's path.
    pub fn elements(&self) -> impl Iterator<Item = Validatable<&'v Value>> + '_ {
        let elements = self.get().as_array().map(Vec::as_slice).unwrap_or_default();
        elements.iter().map(move |element| self.derive(None, element))
    }
}

impl<'v> Validatable<Option<&'v Value>> {
    /// Derives the child for object member `name` through a nullable receiver.
    pub fn key(&self, name: &str) -> Validatable<Option<&'v Value>> {
        self.derive(Some(name), self.get().and_then(|value| value.get(name)))
    }

    /// Iterates over the elements of an array; absent and non-array values yield nothing.
    pub fn elements(&self) -> impl Iterator<Item = Validatable<&'v Value>> + '_ {
        let elements = self
            .get()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        elements.iter().map(move |element| self.derive(None, element))
    }
}
