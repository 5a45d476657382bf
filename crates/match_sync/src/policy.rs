//! Conflict resolution policy

use serde::{Deserialize, Serialize};

/// How a detected conflict should be resolved.
///
/// Conflicts are not errors: they are expected, data-driven branch points.
/// When no handlers are supplied the defaults are asymmetric by design:
/// a concurrent update keeps the working changes, a working-side delete of a
/// source-updated item keeps the working delete, but an update of an item
/// the source already deleted respects the deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictResolution {
    /// The working collection's edit wins
    KeepWorkingChanges,

    /// The source collection's state wins; the working edit is discarded
    KeepSourceChanges,
}

/// The full set of conflict handlers for one sync pass.
///
/// Handlers come as a trio: partial conflict configuration is not
/// representable. Construct with [`ConflictHandlers::new`] and attach via
/// [`SyncCallbacks::on_conflict`](crate::SyncCallbacks::on_conflict).
pub struct ConflictHandlers<'a, S, W> {
    /// Called when the working copy updated an item the source has deleted
    /// since the baseline. Default without handlers: `KeepSourceChanges`.
    pub(crate) source_item_deleted: Box<dyn FnMut(&W) -> ConflictResolution + 'a>,

    /// Called when both the working copy and the source updated the same
    /// item since the baseline. Default without handlers:
    /// `KeepWorkingChanges`.
    pub(crate) updated_item: Box<dyn FnMut(&W, &S) -> ConflictResolution + 'a>,

    /// Called when the working copy deleted an item the source has updated
    /// since the baseline. Default without handlers: `KeepWorkingChanges`.
    pub(crate) work_item_deleted: Box<dyn FnMut(&S) -> ConflictResolution + 'a>,
}

impl<'a, S, W> ConflictHandlers<'a, S, W> {
    /// Bundle the three handlers for one sync pass
    pub fn new(
        source_item_deleted: impl FnMut(&W) -> ConflictResolution + 'a,
        updated_item: impl FnMut(&W, &S) -> ConflictResolution + 'a,
        work_item_deleted: impl FnMut(&S) -> ConflictResolution + 'a,
    ) -> Self {
        Self {
            source_item_deleted: Box::new(source_item_deleted),
            updated_item: Box::new(updated_item),
            work_item_deleted: Box::new(work_item_deleted),
        }
    }
}
