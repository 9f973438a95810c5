//! Misuse of the declaration DSL.

use crate::path::Path;

/// A programming mistake inside a declaration block.
///
/// Misuse never describes the validated value; it means the block itself is
/// wrong. The panicking DSL operations report it through `panic!`, their
/// `try_*` counterparts return it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MisuseError {
    /// A node or constraint was used after its validation run had completed.
    #[error("constraint at '{path}' belongs to a validation run that already completed")]
    RunCompleted { path: Path },

    /// A constraint created in one run's tree was registered on a node of another tree.
    #[error("constraint at '{path}' was registered on a node from a different validation run")]
    ForeignConstraint { path: Path },

    /// `otherwise` was applied twice with different messages.
    #[error("constraint at '{path}' already has the message \"{existing}\", refusing \"{attempted}\"")]
    ConflictingMessage {
        path: Path,
        existing: String,
        attempted: String,
    },
}
