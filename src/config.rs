//! Validator configuration.

use crate::path::Path;

const DEFAULT_VIOLATION_MESSAGE: &str = "The value is invalid.";

/// Settings shared by every run of a validator.
///
/// # Example
///
/// ```rust
/// use scrutiny::{Configuration, Path};
///
/// let configuration = Configuration::new()
///     .with_default_violation_message("invalid")
///     .with_root_path(Path::root().append("payload"));
///
/// assert_eq!(configuration.default_violation_message(), "invalid");
/// assert_eq!(configuration.root_path().to_string(), "payload");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    default_violation_message: String,
    root_path: Path,
}

impl Configuration {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message of violations registered without [`otherwise`](crate::Constraint::otherwise).
    pub fn with_default_violation_message(mut self, message: impl Into<String>) -> Self {
        self.default_violation_message = message.into();
        self
    }

    /// Sets the path given to the root node of every run.
    pub fn with_root_path(mut self, path: Path) -> Self {
        self.root_path = path;
        self
    }

    /// The message used when a violation has none.
    pub fn default_violation_message(&self) -> &str {
        &self.default_violation_message
    }

    /// The path of the root node.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_violation_message: DEFAULT_VIOLATION_MESSAGE.to_string(),
            root_path: Path::root(),
        }
    }
}
