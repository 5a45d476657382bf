//! Per-manager session registry
//!
//! One mutex guards both the token-to-baseline map and the disposed flag, so
//! every registry operation observes a consistent pair. Lock granularity is
//! deliberately coarse: operations are O(collection size) and infrequent.

use crate::registered::RegisteredList;
use crate::token::ConcurrencyToken;
use crate::{Result, SyncError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) struct SessionRegistry<W> {
    state: Mutex<RegistryState<W>>,
}

struct RegistryState<W> {
    sessions: HashMap<ConcurrencyToken, RegisteredList<W>>,
    disposed: bool,
}

impl<W> SessionRegistry<W> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                sessions: HashMap::new(),
                disposed: false,
            }),
        }
    }

    // The critical sections below never panic, so a poisoned lock still
    // guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, RegistryState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fail with [`SyncError::Disposed`] once the manager has been disposed
    pub(crate) fn ensure_live(&self) -> Result<()> {
        if self.lock().disposed {
            return Err(SyncError::Disposed);
        }
        Ok(())
    }

    /// Store a freshly registered baseline under its token
    pub(crate) fn insert(&self, baseline: RegisteredList<W>) -> Result<()> {
        let mut state = self.lock();
        if state.disposed {
            return Err(SyncError::Disposed);
        }
        state.sessions.insert(baseline.token().clone(), baseline);
        Ok(())
    }

    /// Snapshot the baseline registered under `token`.
    ///
    /// A miss is a pure read failure; the registry is left untouched.
    pub(crate) fn baseline(&self, token: &ConcurrencyToken) -> Result<RegisteredList<W>>
    where
        W: Clone,
    {
        let state = self.lock();
        if state.disposed {
            return Err(SyncError::Disposed);
        }
        state
            .sessions
            .get(token)
            .cloned()
            .ok_or_else(|| SyncError::TokenNotFound(token.clone()))
    }

    /// Replace the contents of the baseline registered under `token`.
    ///
    /// The entry itself survives; only its items are swapped out.
    pub(crate) fn replace(&self, token: &ConcurrencyToken, items: Vec<W>) -> Result<()> {
        let mut state = self.lock();
        if state.disposed {
            return Err(SyncError::Disposed);
        }
        let baseline = state
            .sessions
            .get_mut(token)
            .ok_or_else(|| SyncError::TokenNotFound(token.clone()))?;
        baseline.clear();
        baseline.extend(items);
        Ok(())
    }

    /// Drop the session registered under `token`
    pub(crate) fn remove(&self, token: &ConcurrencyToken) -> Result<()> {
        let mut state = self.lock();
        if state.disposed {
            return Err(SyncError::Disposed);
        }
        state
            .sessions
            .remove(token)
            .map(|_| ())
            .ok_or_else(|| SyncError::TokenNotFound(token.clone()))
    }

    /// Clear every session and refuse all further operations.
    ///
    /// Idempotent; returns how many sessions were cleared.
    pub(crate) fn dispose(&self) -> usize {
        let mut state = self.lock();
        state.disposed = true;
        let cleared = state.sessions.len();
        state.sessions.clear();
        cleared
    }
}
