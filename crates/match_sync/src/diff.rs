//! Match-id based diff engine
//!
//! Computes the element-wise relationship between two sequences of matchable
//! entities: identity-key set difference decides Add/Delete, the
//! cross-type content comparison decides Update/Ignore for matched pairs.

use crate::matchable::{ContentEq, Matchable};
use crate::record::{SyncOutcome, SyncRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Diff `source` against `destination` by match id.
///
/// Records come back in three groups: source-only items first (Add), then
/// matched pairs (Update/Ignore), then destination-only items (Delete);
/// within a group items keep their original sequence order. Relative order
/// across items inside one group is not otherwise guaranteed.
///
/// Duplicate match ids are tolerated, not rejected: a destination-side
/// duplicate resolves to its last occurrence, and every source-side
/// occurrence produces its own record.
pub fn diff<'a, S, D>(source: &'a [S], destination: &'a [D]) -> Vec<SyncRecord<'a, S, D>>
where
    S: Matchable + ContentEq<D>,
    D: Matchable,
{
    let dest_by_id: HashMap<&str, &D> = destination.iter().map(|d| (d.match_id(), d)).collect();
    let source_ids: HashSet<&str> = source.iter().map(|s| s.match_id()).collect();

    let mut records = Vec::with_capacity(source.len() + destination.len());

    for s in source {
        if !dest_by_id.contains_key(s.match_id()) {
            records.push(SyncRecord {
                source: Some(s),
                destination: None,
            });
        }
    }

    for s in source {
        if let Some(d) = dest_by_id.get(s.match_id()) {
            records.push(SyncRecord {
                source: Some(s),
                destination: Some(*d),
            });
        }
    }

    for d in destination {
        if !source_ids.contains(d.match_id()) {
            records.push(SyncRecord {
                source: None,
                destination: Some(d),
            });
        }
    }

    records
}

/// True iff diffing `source` against `destination` would produce only
/// `Ignore` records, i.e. applying the diff would change nothing.
pub fn is_match<S, D>(source: &[S], destination: &[D]) -> bool
where
    S: Matchable + ContentEq<D>,
    D: Matchable,
{
    diff(source, destination)
        .iter()
        .all(|record| record.outcome() == SyncOutcome::Ignore)
}

/// The match ids touched by one apply pass, grouped by outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    pub ignored: Vec<String>,
}

impl SyncReport {
    /// True if the pass made no mutations
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Diff and immediately apply the result to `destination`.
///
/// Equivalent to [`apply_with`] without delete or ignore notifications.
pub fn apply<S, D>(
    source: &[S],
    destination: &mut Vec<D>,
    insert: impl FnMut(&S) -> D,
    update: impl FnMut(&S, &mut D),
) -> SyncReport
where
    S: Matchable + ContentEq<D>,
    D: Matchable,
{
    apply_with(source, destination, insert, update, None, None)
}

/// Diff `source` against `destination` and apply every record:
/// `insert` builds the destination item for each Add (the item is appended
/// here, the callback must not touch the collection), `update` mutates the
/// matched destination item for each Update, Delete records are removed
/// from the collection before `on_deleted` sees the removed item, and
/// `on_ignore` is notified for content-equal pairs.
///
/// The exclusive `&mut` borrow of `destination` serializes the whole pass:
/// concurrent appliers on the same collection cannot interleave.
pub fn apply_with<S, D>(
    source: &[S],
    destination: &mut Vec<D>,
    mut insert: impl FnMut(&S) -> D,
    mut update: impl FnMut(&S, &mut D),
    mut on_deleted: Option<&mut dyn FnMut(D)>,
    mut on_ignore: Option<&mut dyn FnMut(&S, &D)>,
) -> SyncReport
where
    S: Matchable + ContentEq<D>,
    D: Matchable,
{
    let mut adds: Vec<&S> = Vec::new();
    let mut updates: Vec<&S> = Vec::new();
    let mut ignores: Vec<&S> = Vec::new();
    let mut deletes: Vec<String> = Vec::new();

    // Classify against the pre-apply state; mutations start only after the
    // whole diff is known.
    {
        let dest_by_id: HashMap<&str, &D> =
            destination.iter().map(|d| (d.match_id(), d)).collect();
        for s in source {
            match dest_by_id.get(s.match_id()) {
                None => adds.push(s),
                Some(d) => {
                    if s.content_eq(d) {
                        ignores.push(s);
                    } else {
                        updates.push(s);
                    }
                }
            }
        }

        let source_ids: HashSet<&str> = source.iter().map(|s| s.match_id()).collect();
        for d in destination.iter() {
            if !source_ids.contains(d.match_id()) {
                deletes.push(d.match_id().to_string());
            }
        }
    }

    let mut report = SyncReport::default();

    for s in adds {
        let item = insert(s);
        destination.push(item);
        report.added.push(s.match_id().to_string());
    }

    for s in updates {
        if let Some(d) = destination.iter_mut().find(|d| d.match_id() == s.match_id()) {
            update(s, d);
        }
        report.updated.push(s.match_id().to_string());
    }

    for id in deletes {
        if let Some(pos) = destination.iter().position(|d| d.match_id() == id) {
            let removed = destination.remove(pos);
            if let Some(cb) = on_deleted.as_mut() {
                cb(removed);
            }
        }
        report.deleted.push(id);
    }

    for s in ignores {
        if let Some(cb) = on_ignore.as_mut() {
            if let Some(d) = destination.iter().find(|d| d.match_id() == s.match_id()) {
                cb(s, d);
            }
        }
        report.ignored.push(s.match_id().to_string());
    }

    report
}
