//! Token-tagged collections used for concurrent syncing

use crate::token::ConcurrencyToken;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// An ordered collection tagged with the [`ConcurrencyToken`] of its
/// session. The registry stores one `RegisteredList` per live token as the
/// baseline snapshot; callers hold a like-tagged copy as their working
/// collection and edit it freely through `Deref`/`DerefMut`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredList<T> {
    token: ConcurrencyToken,
    items: Vec<T>,
}

impl<T> RegisteredList<T> {
    pub(crate) fn new(token: ConcurrencyToken, items: Vec<T>) -> Self {
        Self { token, items }
    }

    /// The token binding this collection to its registered baseline
    pub fn token(&self) -> &ConcurrencyToken {
        &self.token
    }

    /// Consume the list, keeping only the items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Convert every element to another type, preserving the token.
    ///
    /// The first conversion failure aborts and is returned as-is.
    pub fn try_convert<U, E>(
        &self,
        mut convert: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<RegisteredList<U>, E> {
        let items = self
            .items
            .iter()
            .map(&mut convert)
            .collect::<Result<Vec<_>, E>>()?;

        Ok(RegisteredList {
            token: self.token.clone(),
            items,
        })
    }
}

impl<T> Deref for RegisteredList<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.items
    }
}

impl<T> DerefMut for RegisteredList<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<T> IntoIterator for RegisteredList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RegisteredList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
