//! Concurrent sync orchestration
//!
//! The manager lets multiple independent working copies track one
//! authoritative source collection without a "last write wins" data-loss
//! failure mode. Each registered session diffs against its own baseline
//! snapshot of the source, so edits made through one session are detected as
//! source drift by every other session instead of being silently
//! overwritten.

use crate::callbacks::SyncCallbacks;
use crate::diff::diff;
use crate::matchable::{ContentEq, Matchable};
use crate::policy::ConflictResolution;
use crate::record::SyncOutcome;
use crate::registered::RegisteredList;
use crate::registry::SessionRegistry;
use crate::token::ConcurrencyToken;
use crate::Result;
use std::collections::HashMap;

/// How one item in the authoritative source has drifted from the registered
/// baseline since the last registration/sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceDrift {
    /// In the baseline but gone from the source: someone deleted it
    Deleted,

    /// Present on both sides with equal content
    Unchanged,

    /// Present on both sides but the source content moved on
    Changed,

    /// In the source but absent from the baseline: someone else added it
    Appeared,
}

impl From<SyncOutcome> for SourceDrift {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Add => SourceDrift::Deleted,
            SyncOutcome::Ignore => SourceDrift::Unchanged,
            SyncOutcome::Update => SourceDrift::Changed,
            SyncOutcome::Delete => SourceDrift::Appeared,
        }
    }
}

/// How one item in the caller's working copy has drifted from the baseline.
enum WorkingDrift<'a, W> {
    /// New in the working copy
    Added(&'a W),

    /// Edited in the working copy
    Changed(&'a W),

    /// Removed from the working copy
    Removed,

    /// Untouched
    Unchanged(&'a W),
}

/// Manager that syncs collections of [`Matchable`] items concurrently, so
/// multiple instances can work with the same data without wiping out each
/// other's changes.
///
/// `S` is the authoritative source item type, `W` the working item type the
/// caller edits. The converter supplied at construction materializes
/// working-typed views of source items whenever a baseline is stored or
/// returned.
///
/// All operations take `&self` and may be called from multiple threads; the
/// token-to-baseline map is guarded by one mutex per manager instance.
pub struct MatchSyncManager<S, W> {
    registry: SessionRegistry<W>,
    convert: Box<dyn Fn(&S) -> anyhow::Result<W> + Send + Sync>,
}

impl<S, W> MatchSyncManager<S, W>
where
    S: Matchable,
    W: Matchable + ContentEq<W> + ContentEq<S> + Clone,
{
    /// Create a manager with the source-to-working item converter.
    ///
    /// A converter failure aborts the operation that needed it and is
    /// surfaced unmodified inside [`SyncError::Conversion`](crate::SyncError::Conversion).
    pub fn new(convert: impl Fn(&S) -> anyhow::Result<W> + Send + Sync + 'static) -> Self {
        Self {
            registry: SessionRegistry::new(),
            convert: Box::new(convert),
        }
    }

    /// Register the current state of the source collection for subsequent
    /// syncs.
    ///
    /// Stores a working-typed baseline snapshot under a fresh token and
    /// returns an independent like-tagged copy as the caller's first working
    /// collection. Every registered session must eventually be released with
    /// [`terminate`](Self::terminate) or the baseline map grows for the life
    /// of the manager.
    pub fn register(&self, source: &[S]) -> Result<RegisteredList<W>> {
        self.registry.ensure_live()?;

        let items: Vec<W> = source
            .iter()
            .map(|item| (self.convert)(item))
            .collect::<anyhow::Result<_>>()?;

        let baseline = RegisteredList::new(ConcurrencyToken::generate(), items);
        let working = baseline.clone();
        self.registry.insert(baseline)?;

        tracing::debug!(
            "registered {} items under token {}",
            working.len(),
            working.token()
        );
        Ok(working)
    }

    /// One reconciliation pass that does **not** advance the stored
    /// baseline. Intended for polling loops that will sync again soon
    /// without persisting the source.
    pub fn continuous_sync(
        &self,
        working: &RegisteredList<W>,
        source: &mut Vec<S>,
        callbacks: SyncCallbacks<'_, S, W>,
    ) -> Result<RegisteredList<W>> {
        self.registry.ensure_live()?;
        self.concurrent_sync(working, source, callbacks)
    }

    /// One reconciliation pass that **does** advance the stored baseline to
    /// the post-sync source state. Intended for commit points: persist the
    /// source collection afterwards, or the baseline and the stored data
    /// drift apart.
    pub fn sync(
        &self,
        working: &RegisteredList<W>,
        source: &mut Vec<S>,
        callbacks: SyncCallbacks<'_, S, W>,
    ) -> Result<RegisteredList<W>> {
        self.registry.ensure_live()?;
        let result = self.concurrent_sync(working, source, callbacks)?;
        self.registry.replace(result.token(), result.to_vec())?;
        Ok(result)
    }

    /// Release the session bound to `working`'s token.
    pub fn terminate(&self, working: &RegisteredList<W>) -> Result<()> {
        self.registry.ensure_live()?;
        self.registry.remove(working.token())?;
        tracing::debug!("terminated session {}", working.token());
        Ok(())
    }

    /// Clear every registered session and invalidate the manager. All
    /// subsequent operations fail with [`SyncError::Disposed`](crate::SyncError::Disposed).
    ///
    /// Dropping the manager performs the same cleanup; an explicit dispose
    /// only matters when the manager is shared and other holders must start
    /// seeing the disposed error.
    pub fn dispose(&self) {
        let cleared = self.registry.dispose();
        tracing::debug!("disposed manager, cleared {} registered sessions", cleared);
    }

    /// The three-way reconciliation at the heart of both sync flavors.
    fn concurrent_sync(
        &self,
        working: &RegisteredList<W>,
        source: &mut Vec<S>,
        mut callbacks: SyncCallbacks<'_, S, W>,
    ) -> Result<RegisteredList<W>> {
        callbacks.validate()?;

        let baseline = self.registry.baseline(working.token())?;

        // How the authoritative source drifted from the shared baseline.
        // Only the drift kind is kept; items are re-looked-up at apply time
        // because the phases below mutate the source collection.
        let source_drift: HashMap<String, SourceDrift> = diff(&baseline, source.as_slice())
            .into_iter()
            .map(|record| (record.match_id().to_string(), record.outcome().into()))
            .collect();

        // How the caller's working copy drifted from the same baseline, in
        // working order.
        let working_drift: Vec<(&str, WorkingDrift<'_, W>)> = diff(working, &baseline)
            .into_iter()
            .map(|record| {
                let drift = match (record.outcome(), record.source) {
                    (SyncOutcome::Add, Some(w)) => WorkingDrift::Added(w),
                    (SyncOutcome::Update, Some(w)) => WorkingDrift::Changed(w),
                    (SyncOutcome::Ignore, Some(w)) => WorkingDrift::Unchanged(w),
                    _ => WorkingDrift::Removed,
                };
                (record.match_id(), drift)
            })
            .collect();

        let mut inserted = 0usize;
        let mut updated = 0usize;
        let mut deleted = 0usize;
        let mut conflicts = 0usize;

        // Brand-new working items, unless someone else already inserted the
        // same id into the source.
        for (id, drift) in &working_drift {
            if let WorkingDrift::Added(w) = drift {
                if !contains_id(source, id) {
                    let item = (callbacks.insert)(w);
                    source.push(item);
                    inserted += 1;
                }
            }
        }

        // Working updates against a source-side delete. The deletion wins
        // unless the handler asks for the working item back.
        for (id, drift) in &working_drift {
            if let WorkingDrift::Changed(w) = drift {
                if source_drift.get(*id) == Some(&SourceDrift::Deleted) {
                    conflicts += 1;
                    let resolution = match callbacks.conflicts.as_mut() {
                        Some(handlers) => (handlers.source_item_deleted)(w),
                        None => ConflictResolution::KeepSourceChanges,
                    };
                    if resolution == ConflictResolution::KeepWorkingChanges
                        && !contains_id(source, id)
                    {
                        let item = (callbacks.insert)(w);
                        source.push(item);
                        inserted += 1;
                    }
                }
            }
        }

        // Plain updates: only the working copy moved.
        for (id, drift) in &working_drift {
            if let WorkingDrift::Changed(w) = drift {
                if source_drift.get(*id) == Some(&SourceDrift::Unchanged) {
                    if let Some(item) = source.iter_mut().find(|s| s.match_id() == *id) {
                        (callbacks.update)(w, item);
                        updated += 1;
                    }
                }
            }
        }

        // Both sides updated the same item. The working edit wins unless the
        // handler says otherwise.
        for (id, drift) in &working_drift {
            if let WorkingDrift::Changed(w) = drift {
                if source_drift.get(*id) == Some(&SourceDrift::Changed) {
                    conflicts += 1;
                    let resolution = match callbacks.conflicts.as_mut() {
                        Some(handlers) => match source.iter().find(|s| s.match_id() == *id) {
                            Some(item) => (handlers.updated_item)(w, item),
                            None => ConflictResolution::KeepWorkingChanges,
                        },
                        None => ConflictResolution::KeepWorkingChanges,
                    };
                    if resolution == ConflictResolution::KeepWorkingChanges {
                        if let Some(item) = source.iter_mut().find(|s| s.match_id() == *id) {
                            (callbacks.update)(w, item);
                            updated += 1;
                        }
                    }
                }
            }
        }

        // Plain deletes: removed from the working copy, untouched in the
        // source. The item leaves the collection before the notification.
        for (id, drift) in &working_drift {
            if let WorkingDrift::Removed = drift {
                if source_drift.get(*id) == Some(&SourceDrift::Unchanged) {
                    if let Some(pos) = source.iter().position(|s| s.match_id() == *id) {
                        let removed = source.remove(pos);
                        deleted += 1;
                        if let Some(cb) = callbacks.on_deleted.as_mut() {
                            cb(removed);
                        }
                    }
                }
            }
        }

        // Working-side delete of an item the source has updated. The delete
        // wins unless the handler keeps the source changes.
        for (id, drift) in &working_drift {
            if let WorkingDrift::Removed = drift {
                if source_drift.get(*id) == Some(&SourceDrift::Changed) {
                    conflicts += 1;
                    let resolution = match callbacks.conflicts.as_mut() {
                        Some(handlers) => match source.iter().find(|s| s.match_id() == *id) {
                            Some(item) => (handlers.work_item_deleted)(item),
                            None => ConflictResolution::KeepWorkingChanges,
                        },
                        None => ConflictResolution::KeepWorkingChanges,
                    };
                    if resolution == ConflictResolution::KeepWorkingChanges {
                        if let Some(pos) = source.iter().position(|s| s.match_id() == *id) {
                            let removed = source.remove(pos);
                            deleted += 1;
                            if let Some(cb) = callbacks.on_deleted.as_mut() {
                                cb(removed);
                            }
                        }
                    }
                }
            }
        }

        // Untouched on both sides; notification only.
        if let Some(on_ignore) = callbacks.on_ignore.as_mut() {
            for (id, drift) in &working_drift {
                if let WorkingDrift::Unchanged(w) = drift {
                    if source_drift.get(*id) == Some(&SourceDrift::Unchanged) {
                        if let Some(item) = source.iter().find(|s| s.match_id() == *id) {
                            on_ignore(w, item);
                        }
                    }
                }
            }
        }

        tracing::debug!(
            "sync pass for token {}: {} inserted, {} updated, {} deleted, {} conflicts",
            working.token(),
            inserted,
            updated,
            deleted,
            conflicts
        );

        // Re-materialize the post-pass source as the caller's next working
        // collection, under the same token.
        let items: Vec<W> = source
            .iter()
            .map(|item| (self.convert)(item))
            .collect::<anyhow::Result<_>>()?;
        Ok(RegisteredList::new(working.token().clone(), items))
    }
}

impl<S, W> Drop for MatchSyncManager<S, W> {
    fn drop(&mut self) {
        self.registry.dispose();
    }
}

fn contains_id<T: Matchable>(items: &[T], id: &str) -> bool {
    items.iter().any(|item| item.match_id() == id)
}
