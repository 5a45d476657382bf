//! # MatchSync
//!
//! Three-way, in-memory collection synchronization for independently edited
//! copies of a shared "source of truth".
//!
//! ## Architecture
//!
//! - **Matchable contract**: entities expose a stable [`Matchable::match_id`];
//!   cross-type content equality goes through [`ContentEq`]
//! - **Diff engine**: [`diff()`]/[`is_match()`]/[`apply()`] classify two
//!   sequences into Add/Update/Delete/Ignore by identity-key set difference
//! - **Session registry**: one baseline snapshot per [`ConcurrencyToken`],
//!   guarded by a per-manager mutex
//! - **Sync orchestrator**: [`MatchSyncManager`] diffs working-vs-baseline
//!   and baseline-vs-source, then applies or escalates to conflict policy
//! - **Conflict policy**: caller-supplied [`ConflictHandlers`] returning
//!   [`ConflictResolution`], with documented defaults when absent
//!
//! ## Usage
//!
//! ```rust
//! use match_sync::matchable::{ContentEq, Matchable};
//! use match_sync::{MatchSyncManager, SyncCallbacks};
//!
//! #[derive(Clone)]
//! struct Row {
//!     id: String,
//!     value: i64,
//! }
//!
//! impl Matchable for Row {
//!     fn match_id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! impl ContentEq for Row {
//!     fn content_eq(&self, other: &Row) -> bool {
//!         self.value == other.value
//!     }
//! }
//!
//! fn main() -> match_sync::Result<()> {
//!     let manager: MatchSyncManager<Row, Row> =
//!         MatchSyncManager::new(|row: &Row| Ok(row.clone()));
//!
//!     let mut source = vec![Row { id: "a".into(), value: 1 }];
//!     let mut working = manager.register(&source)?;
//!
//!     // edit the working copy independently of the source
//!     working.push(Row { id: "b".into(), value: 5 });
//!
//!     let callbacks = SyncCallbacks::new(
//!         |w: &Row| w.clone(),
//!         |w: &Row, s: &mut Row| s.value = w.value,
//!     )
//!     .on_deleted(|_removed: Row| {});
//!
//!     let working = manager.sync(&working, &mut source, callbacks)?;
//!     assert_eq!(source.len(), 2);
//!
//!     manager.terminate(&working)?;
//!     Ok(())
//! }
//! ```

pub mod callbacks;
pub mod diff;
pub mod manager;
pub mod matchable;
pub mod policy;
pub mod record;
pub mod registered;
mod registry;
pub mod token;

pub use callbacks::SyncCallbacks;
pub use diff::{apply, apply_with, diff, is_match, SyncReport};
pub use manager::MatchSyncManager;
pub use matchable::{ContentEq, Matchable};
pub use policy::{ConflictHandlers, ConflictResolution};
pub use record::{SyncOutcome, SyncRecord};
pub use registered::RegisteredList;
pub use token::ConcurrencyToken;

/// Common result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur during sync operations
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A required callback was not supplied for this call shape
    #[error("required callback `{0}` was not supplied")]
    MissingCallback(&'static str),

    /// The referenced session token is unregistered, already terminated, or
    /// never was valid
    #[error("token {0} is not registered")]
    TokenNotFound(ConcurrencyToken),

    /// The manager was disposed before this operation
    #[error("manager has been disposed")]
    Disposed,

    /// The caller-supplied item converter failed; the underlying error is
    /// passed through unmodified
    #[error("item conversion failed: {0}")]
    Conversion(#[from] anyhow::Error),
}
