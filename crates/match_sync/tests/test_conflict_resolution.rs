//! Conflict classification and resolution tests
//!
//! Each case sets up one divergence between a working copy and the source
//! relative to their shared baseline, then checks which callbacks fire and
//! what survives in the source collection.

use match_sync::{ConflictHandlers, ConflictResolution, MatchSyncManager, SyncCallbacks};
use match_sync_test_helpers::prelude::*;

fn manager() -> MatchSyncManager<SourceItem, WorkingItem> {
    MatchSyncManager::new(to_working)
}

fn recording_callbacks<'a>(log: &'a CallLog) -> SyncCallbacks<'a, SourceItem, WorkingItem> {
    SyncCallbacks::new(
        move |w: &WorkingItem| {
            log.push(format!("insert:{}", w.id));
            to_source(w)
        },
        move |w: &WorkingItem, s: &mut SourceItem| {
            log.push(format!("update:{}:{}", w.id, w.value));
            s.value = w.value;
        },
    )
    .on_deleted(move |removed: SourceItem| log.push(format!("deleted:{}", removed.id)))
}

/// Working updated x, source independently updated x.
#[test]
fn test_concurrent_update_defaults_to_working_changes() {
    let manager = manager();
    let mut source = vec![source_item("x", 1)];
    let mut working = manager.register(&source).unwrap();

    working[0].value = 2; // this session's edit
    source[0].value = 3; // someone else's edit

    let log = CallLog::new();
    manager
        .sync(&working, &mut source, recording_callbacks(&log))
        .unwrap();

    assert_eq!(log.entries(), vec!["update:x:2"]);
    assert_eq!(source[0].value, 2);
}

#[test]
fn test_concurrent_update_handler_can_keep_source_changes() {
    let manager = manager();
    let mut source = vec![source_item("x", 1)];
    let mut working = manager.register(&source).unwrap();

    working[0].value = 2;
    source[0].value = 3;

    let log = CallLog::new();
    let handlers = ConflictHandlers::new(
        |_w: &WorkingItem| ConflictResolution::KeepSourceChanges,
        |w: &WorkingItem, s: &SourceItem| {
            log.push(format!("conflict:update:{}:{}v{}", w.id, w.value, s.value));
            ConflictResolution::KeepSourceChanges
        },
        |_s: &SourceItem| ConflictResolution::KeepWorkingChanges,
    );
    manager
        .sync(
            &working,
            &mut source,
            recording_callbacks(&log).on_conflict(handlers),
        )
        .unwrap();

    // the handler saw both versions and the source edit survived
    assert_eq!(log.entries(), vec!["conflict:update:x:2v3"]);
    assert_eq!(source[0].value, 3);
}

/// Working updated x, source deleted x.
#[test]
fn test_update_of_source_deleted_item_respects_deletion_by_default() {
    let manager = manager();
    let mut source = vec![source_item("x", 1)];
    let mut working = manager.register(&source).unwrap();

    working[0].value = 2;
    source.clear();

    let log = CallLog::new();
    let next = manager
        .sync(&working, &mut source, recording_callbacks(&log))
        .unwrap();

    assert!(log.is_empty());
    assert!(source.is_empty());
    assert!(next.is_empty());
}

#[test]
fn test_update_of_source_deleted_item_can_be_reinserted() {
    let manager = manager();
    let mut source = vec![source_item("x", 1)];
    let mut working = manager.register(&source).unwrap();

    working[0].value = 2;
    source.clear();

    let log = CallLog::new();
    let handlers = ConflictHandlers::new(
        |w: &WorkingItem| {
            log.push(format!("conflict:source-deleted:{}", w.id));
            ConflictResolution::KeepWorkingChanges
        },
        |_w: &WorkingItem, _s: &SourceItem| ConflictResolution::KeepWorkingChanges,
        |_s: &SourceItem| ConflictResolution::KeepWorkingChanges,
    );
    manager
        .sync(
            &working,
            &mut source,
            recording_callbacks(&log).on_conflict(handlers),
        )
        .unwrap();

    assert_eq!(
        log.entries(),
        vec!["conflict:source-deleted:x", "insert:x"]
    );
    assert_eq!(ids(&source), vec!["x"]);
    assert_eq!(source[0].value, 2);
}

/// Working deleted x, source independently updated x.
#[test]
fn test_delete_of_source_updated_item_wins_by_default() {
    let manager = manager();
    let mut source = vec![source_item("x", 1)];
    let mut working = manager.register(&source).unwrap();
    working.clear();

    source[0].value = 3;

    let log = CallLog::new();
    manager
        .sync(&working, &mut source, recording_callbacks(&log))
        .unwrap();

    assert_eq!(log.entries(), vec!["deleted:x"]);
    assert!(source.is_empty());
}

#[test]
fn test_delete_of_source_updated_item_can_be_kept() {
    let manager = manager();
    let mut source = vec![source_item("x", 1)];
    let mut working = manager.register(&source).unwrap();
    working.clear();

    source[0].value = 3;

    let log = CallLog::new();
    let handlers = ConflictHandlers::new(
        |_w: &WorkingItem| ConflictResolution::KeepSourceChanges,
        |_w: &WorkingItem, _s: &SourceItem| ConflictResolution::KeepWorkingChanges,
        |s: &SourceItem| {
            log.push(format!("conflict:work-deleted:{}:{}", s.id, s.value));
            ConflictResolution::KeepSourceChanges
        },
    );
    manager
        .sync(
            &working,
            &mut source,
            recording_callbacks(&log).on_conflict(handlers),
        )
        .unwrap();

    // no delete happened; the handler saw the updated source item
    assert_eq!(log.entries(), vec!["conflict:work-deleted:x:3"]);
    assert_eq!(source[0].value, 3);
}

/// Untouched on both sides: notification only, no mutation.
#[test]
fn test_unchanged_pairs_only_notify_on_ignore() {
    let manager = manager();
    let mut source = vec![source_item("a", 1), source_item("b", 2)];
    let working = manager.register(&source).unwrap();

    let log = CallLog::new();
    let callbacks = recording_callbacks(&log)
        .on_ignore(|w: &WorkingItem, _s: &SourceItem| log.push(format!("ignored:{}", w.id)));
    manager.sync(&working, &mut source, callbacks).unwrap();

    assert_eq!(log.entries(), vec!["ignored:a", "ignored:b"]);
    assert_eq!(source[0].value, 1);
    assert_eq!(source[1].value, 2);
}

/// A mixed pass: one of everything in a single sync call.
#[test]
fn test_mixed_pass_applies_each_category_in_order() {
    let manager = manager();
    let mut source = vec![
        source_item("keep", 1),
        source_item("edit", 2),
        source_item("drop", 3),
    ];
    let mut working = manager.register(&source).unwrap();

    working.push(working_item("new", 4));
    working.iter_mut().find(|w| w.id == "edit").unwrap().value = 20;
    working.retain(|w| w.id != "drop");

    let log = CallLog::new();
    manager
        .sync(&working, &mut source, recording_callbacks(&log))
        .unwrap();

    assert_eq!(
        log.entries(),
        vec!["insert:new", "update:edit:20", "deleted:drop"]
    );
    assert_eq!(ids(&source), vec!["keep", "edit", "new"]);
}
