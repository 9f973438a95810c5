//! The violation collection shared by every node of one validation run.

use std::panic::Location;
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::error::{ConstraintViolation, MisuseError};
use crate::path::Path;

/// Identity of one registered violation.
///
/// Two descriptors are the same violation when they share a path, a message
/// and the declaring predicate: the source location of a `constrain` call,
/// or the builder itself for constraint builders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ConstraintDescriptor {
    pub(crate) path: Path,
    pub(crate) message: Option<String>,
    pub(crate) origin: Option<&'static Location<'static>>,
}

impl ConstraintDescriptor {
    /// Whether `self` is the messaged form of the pending descriptor `pending`.
    fn is_messaged_form_of(&self, pending: &ConstraintDescriptor) -> bool {
        self.message.is_some() && self.path == pending.path && self.origin == pending.origin
    }

    pub(crate) fn into_violation(self, default_message: &str) -> ConstraintViolation {
        let message = self
            .message
            .unwrap_or_else(|| default_message.to_string());
        ConstraintViolation::new(self.path, message)
    }
}

impl From<ConstraintViolation> for ConstraintDescriptor {
    fn from(violation: ConstraintViolation) -> Self {
        Self {
            path: violation.path,
            message: Some(violation.message),
            origin: None,
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    entries: IndexSet<ConstraintDescriptor>,
    completed: bool,
}

/// Shared handle to a run's violations.
///
/// Every node derived from one root clones the same handle, so registering
/// against any of them lands in a single ordered set. The mutex keeps the set
/// consistent when a declaration block fans out across tasks.
#[derive(Debug, Clone, Default)]
pub(crate) struct ViolationStore {
    state: Arc<Mutex<StoreState>>,
}

impl ViolationStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns true when both handles point at the same run's collection.
    pub(crate) fn same_run(&self, other: &ViolationStore) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    pub(crate) fn ensure_open(&self, path: &Path) -> Result<(), MisuseError> {
        if self.state.lock().completed {
            Err(MisuseError::RunCompleted { path: path.clone() })
        } else {
            Ok(())
        }
    }

    /// Inserts a descriptor, returning true if it was not already present.
    ///
    /// A descriptor without a message is also skipped once the same
    /// declaration on the same path has been given one.
    pub(crate) fn insert(&self, descriptor: ConstraintDescriptor) -> Result<bool, MisuseError> {
        let mut state = self.state.lock();
        if state.completed {
            return Err(MisuseError::RunCompleted {
                path: descriptor.path,
            });
        }
        if descriptor.message.is_none()
            && descriptor.origin.is_some()
            && state.entries.iter().any(|entry| entry.is_messaged_form_of(&descriptor))
        {
            return Ok(false);
        }
        tracing::trace!(path = %descriptor.path, "constraint violated");
        Ok(state.entries.insert(descriptor))
    }

    /// Replaces a descriptor by the same one carrying a new message.
    ///
    /// When `owned` is set the current entry was inserted by the constraint
    /// being messaged, and the messaged entry takes over its position.
    /// Otherwise the current entry belongs to an earlier declaration and is
    /// left alone. Returns true if the messaged entry was inserted by this call.
    pub(crate) fn attach_message(
        &self,
        pending: &ConstraintDescriptor,
        owned: bool,
        messaged: ConstraintDescriptor,
    ) -> Result<bool, MisuseError> {
        let mut state = self.state.lock();
        if state.completed {
            return Err(MisuseError::RunCompleted {
                path: messaged.path,
            });
        }

        let slot = if owned {
            state.entries.get_index_of(pending)
        } else {
            None
        };

        match slot {
            Some(index) => {
                state.entries.shift_remove_index(index);
                if state.entries.contains(&messaged) {
                    return Ok(false);
                }
                if index < state.entries.len() {
                    state.entries.shift_insert(index, messaged);
                } else {
                    state.entries.insert(messaged);
                }
                Ok(true)
            }
            None => Ok(state.entries.insert(messaged)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Marks the run as completed and hands out its violations in registration order.
    ///
    /// Any later registration through a handle of this store is rejected.
    pub(crate) fn complete(&self, default_message: &str) -> Vec<ConstraintViolation> {
        let mut state = self.state.lock();
        state.completed = true;
        std::mem::take(&mut state.entries)
            .into_iter()
            .map(|descriptor| descriptor.into_violation(default_message))
            .collect()
    }
}
