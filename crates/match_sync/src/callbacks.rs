//! Per-call sync configuration

use crate::policy::ConflictHandlers;
use crate::{Result, SyncError};

/// The callback set for one sync pass.
///
/// `insert` and `update` are always required and are taken by
/// [`SyncCallbacks::new`]. The remaining callbacks are attached with the
/// builder methods:
///
/// - `on_deleted` is required unless a full [`ConflictHandlers`] trio is
///   supplied; deleting from the source without having thought about delete
///   side effects is rejected before any diff work begins.
/// - `on_ignore` is always optional.
pub struct SyncCallbacks<'a, S, W> {
    /// Builds a new source item from a working item about to be inserted.
    /// The orchestrator appends the returned item; the callback must not
    /// mutate the source collection itself.
    pub(crate) insert: Box<dyn FnMut(&W) -> S + 'a>,

    /// Applies a working item's changes to the matching source item in place
    pub(crate) update: Box<dyn FnMut(&W, &mut S) + 'a>,

    /// Notification with the source item just removed from the collection
    pub(crate) on_deleted: Option<Box<dyn FnMut(S) + 'a>>,

    /// Notification for pairs that needed no reconciliation
    pub(crate) on_ignore: Option<Box<dyn FnMut(&W, &S) + 'a>>,

    /// Conflict policy; defaults documented on [`ConflictHandlers`] apply
    /// when absent
    pub(crate) conflicts: Option<ConflictHandlers<'a, S, W>>,
}

impl<'a, S, W> SyncCallbacks<'a, S, W> {
    /// Create a callback set with the two mandatory callbacks
    pub fn new(
        insert: impl FnMut(&W) -> S + 'a,
        update: impl FnMut(&W, &mut S) + 'a,
    ) -> Self {
        Self {
            insert: Box::new(insert),
            update: Box::new(update),
            on_deleted: None,
            on_ignore: None,
            conflicts: None,
        }
    }

    /// Attach a delete notification
    pub fn on_deleted(mut self, on_deleted: impl FnMut(S) + 'a) -> Self {
        self.on_deleted = Some(Box::new(on_deleted));
        self
    }

    /// Attach an ignore notification
    pub fn on_ignore(mut self, on_ignore: impl FnMut(&W, &S) + 'a) -> Self {
        self.on_ignore = Some(Box::new(on_ignore));
        self
    }

    /// Attach a full conflict-handler trio
    pub fn on_conflict(mut self, handlers: ConflictHandlers<'a, S, W>) -> Self {
        self.conflicts = Some(handlers);
        self
    }

    /// Check the callback set before any diff work begins
    pub(crate) fn validate(&self) -> Result<()> {
        if self.on_deleted.is_none() && self.conflicts.is_none() {
            return Err(SyncError::MissingCallback("on_deleted"));
        }
        Ok(())
    }
}
