//! Interior-mutable callback recording
//!
//! Sync callbacks are `FnMut` closures handed to the library by value, so
//! several of them cannot share a `&mut` log. `CallLog` uses interior
//! mutability to let every closure of one test append to the same log.

use std::cell::RefCell;

/// A shared log of callback invocations.
#[derive(Debug, Default)]
pub struct CallLog {
    entries: RefCell<Vec<String>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    /// Snapshot of all entries, in invocation order
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Number of entries starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }

    /// True if no callback fired
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
