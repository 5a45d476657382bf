//! Sample matchable entity types for tests
//!
//! `SourceItem` plays the authoritative source type, `WorkingItem` the
//! caller-edited working type. Content equality compares `value` only, so a
//! test changes an item's content by bumping its value.

use match_sync::matchable::{ContentEq, Matchable};

/// Source-typed fixture entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub id: String,
    pub value: i64,
}

/// Working-typed fixture entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingItem {
    pub id: String,
    pub value: i64,
}

impl Matchable for SourceItem {
    fn match_id(&self) -> &str {
        &self.id
    }
}

impl Matchable for WorkingItem {
    fn match_id(&self) -> &str {
        &self.id
    }
}

impl ContentEq for SourceItem {
    fn content_eq(&self, other: &SourceItem) -> bool {
        self.value == other.value
    }
}

impl ContentEq for WorkingItem {
    fn content_eq(&self, other: &WorkingItem) -> bool {
        self.value == other.value
    }
}

impl ContentEq<SourceItem> for WorkingItem {
    fn content_eq(&self, other: &SourceItem) -> bool {
        self.value == other.value
    }
}

pub fn source_item(id: &str, value: i64) -> SourceItem {
    SourceItem {
        id: id.to_string(),
        value,
    }
}

pub fn working_item(id: &str, value: i64) -> WorkingItem {
    WorkingItem {
        id: id.to_string(),
        value,
    }
}

/// The standard source-to-working converter handed to managers under test
pub fn to_working(item: &SourceItem) -> anyhow::Result<WorkingItem> {
    Ok(WorkingItem {
        id: item.id.clone(),
        value: item.value,
    })
}

/// The standard insert callback: materialize a source item from a working
/// item
pub fn to_source(item: &WorkingItem) -> SourceItem {
    SourceItem {
        id: item.id.clone(),
        value: item.value,
    }
}

/// Match ids of a collection, in order
pub fn ids<T: Matchable>(items: &[T]) -> Vec<&str> {
    items.iter().map(Matchable::match_id).collect()
}
