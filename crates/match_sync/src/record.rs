//! Diff records and their derived outcomes

use crate::matchable::{ContentEq, Matchable};
use serde::{Deserialize, Serialize};

/// What has to happen for one matched entity to bring the destination in
/// line with the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncOutcome {
    /// Both sides present and content-equal; nothing to do
    Ignore,

    /// Present on the source side only; insert into the destination
    Add,

    /// Both sides present but content differs; update the destination
    Update,

    /// Present on the destination side only; remove from the destination
    Delete,
}

/// A transient pairing of at most one source-side item and one
/// destination-side item sharing a match id.
///
/// Records are produced fresh by each diff call and never persisted. The
/// outcome is derived from presence and content equality, not stored.
#[derive(Debug)]
pub struct SyncRecord<'a, S, D> {
    /// The item carrying the changes
    pub source: Option<&'a S>,

    /// The item that would be updated
    pub destination: Option<&'a D>,
}

impl<'a, S, D> SyncRecord<'a, S, D>
where
    S: Matchable,
    D: Matchable,
{
    /// The match id shared by the pair
    pub fn match_id(&self) -> &'a str {
        match (self.source, self.destination) {
            (Some(s), _) => s.match_id(),
            (_, Some(d)) => d.match_id(),
            (None, None) => "",
        }
    }
}

impl<'a, S, D> SyncRecord<'a, S, D>
where
    S: Matchable + ContentEq<D>,
    D: Matchable,
{
    /// Derive the outcome from presence and content equality of the pair
    pub fn outcome(&self) -> SyncOutcome {
        match (self.source, self.destination) {
            (Some(_), None) => SyncOutcome::Add,
            (None, Some(_)) => SyncOutcome::Delete,
            (Some(s), Some(d)) => {
                if s.match_id() == d.match_id() && !s.content_eq(d) {
                    SyncOutcome::Update
                } else {
                    SyncOutcome::Ignore
                }
            }
            (None, None) => SyncOutcome::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_sync_test_helpers::prelude::*;

    #[test]
    fn test_source_only_is_add() {
        let s = working_item("a", 1);
        let record: SyncRecord<'_, _, SourceItem> = SyncRecord {
            source: Some(&s),
            destination: None,
        };

        assert_eq!(record.outcome(), SyncOutcome::Add);
        assert_eq!(record.match_id(), "a");
    }

    #[test]
    fn test_destination_only_is_delete() {
        let d = source_item("a", 1);
        let record: SyncRecord<'_, WorkingItem, _> = SyncRecord {
            source: None,
            destination: Some(&d),
        };

        assert_eq!(record.outcome(), SyncOutcome::Delete);
        assert_eq!(record.match_id(), "a");
    }

    #[test]
    fn test_equal_pair_is_ignore() {
        let s = working_item("a", 1);
        let d = source_item("a", 1);
        let record = SyncRecord {
            source: Some(&s),
            destination: Some(&d),
        };

        assert_eq!(record.outcome(), SyncOutcome::Ignore);
    }

    #[test]
    fn test_differing_pair_is_update() {
        let s = working_item("a", 1);
        let d = source_item("a", 2);
        let record = SyncRecord {
            source: Some(&s),
            destination: Some(&d),
        };

        assert_eq!(record.outcome(), SyncOutcome::Update);
    }
}
