use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use til_insights::analytics::{current_streak, progress};
use til_insights::db::Database;
use til_insights::models::{Goal, GoalStatus, LogEntry};
use til_insights::store::{EntryUpdate, GoalUpdate, KvRepository, Repository, StoreChange};

fn open_repo(temp_dir: &TempDir) -> KvRepository<Database> {
    let db = Database::open(&temp_dir.path().join("til.db")).unwrap();
    db.initialize_schema().unwrap();
    KvRepository::new(db)
}

#[test]
fn test_sqlite_repository_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();

    {
        let repo = open_repo(&temp_dir);
        repo.save_entry(
            LogEntry::new("entry-1", "Pinning futures", "2024-06-14T09:00:00.000Z")
                .with_tags(["rust", "async"]),
        )
        .unwrap();
        repo.save_goal(
            Goal::new("goal-1", "Async Rust", "2024-06-01T00:00:00.000Z")
                .with_related_tags(["async"])
                .with_target(Some(2)),
        )
        .unwrap();
    }

    let repo = open_repo(&temp_dir);
    let entries = repo.list_entries().unwrap();
    let goals = repo.list_goals().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tags, vec!["rust", "async"]);
    assert_eq!(goals[0].target_entries, Some(2));
    assert_eq!(progress(&goals[0], &entries), 50);
}

#[test]
fn test_sqlite_repository_updates_and_deletes() {
    let temp_dir = TempDir::new().unwrap();
    let repo = open_repo(&temp_dir);

    repo.save_entry(LogEntry::new("entry-1", "first", "2024-06-13T09:00:00Z")).unwrap();
    repo.save_entry(LogEntry::new("entry-2", "second", "2024-06-14T09:00:00Z")).unwrap();

    let update = EntryUpdate {
        tags: Some(vec!["sql".to_string()]),
        ..Default::default()
    };
    let updated = repo.update_entry("entry-1", update).unwrap().unwrap();
    assert_eq!(updated.tags, vec!["sql"]);
    assert_eq!(updated.created_at, "2024-06-13T09:00:00Z");

    assert!(repo.delete_entry("entry-2").unwrap());
    assert!(!repo.delete_entry("entry-2").unwrap());

    let ids: Vec<String> = repo.list_entries().unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["entry-1"]);
}

#[test]
fn test_sqlite_repository_notifies_listeners() {
    let temp_dir = TempDir::new().unwrap();
    let repo = open_repo(&temp_dir);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    repo.subscribe(Box::new(move |change| sink.lock().unwrap().push(change)));

    repo.save_goal(Goal::new("goal-1", "SQL", "2024-06-01")).unwrap();
    repo.update_goal("goal-1", GoalUpdate::status(GoalStatus::Paused)).unwrap();
    repo.save_entry(LogEntry::new("entry-1", "joins", "2024-06-01")).unwrap();
    repo.clear_all().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            StoreChange::Goals,
            StoreChange::Goals,
            StoreChange::Entries,
            StoreChange::Cleared
        ]
    );
    assert!(repo.list_entries().unwrap().is_empty());
    assert!(repo.list_goals().unwrap().is_empty());
}

#[test]
fn test_analytics_on_stored_snapshot_ignore_storage_order() {
    use chrono::{TimeZone, Utc};

    let temp_dir = TempDir::new().unwrap();
    let repo = open_repo(&temp_dir);

    // Saved out of chronological order on purpose
    for (id, ts) in [
        ("b", "2024-06-14T09:00:00Z"),
        ("a", "2024-06-15T09:00:00Z"),
        ("c", "2024-06-13T09:00:00Z"),
    ] {
        repo.save_entry(LogEntry::new(id, "note", ts)).unwrap();
    }

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap();
    assert_eq!(current_streak(&repo.list_entries().unwrap(), &now), 3);
}

#[test]
fn test_corrupt_collection_is_a_serialization_error() {
    use til_insights::store::KeyValueBackend;
    use til_insights::AppError;

    let temp_dir = TempDir::new().unwrap();
    let repo = open_repo(&temp_dir);
    repo.backend().set("til-log-entries", "{not json").unwrap();

    assert!(matches!(repo.list_entries(), Err(AppError::Serialization(_))));
}

#[test]
fn test_malformed_timestamps_never_reach_storage() {
    use til_insights::AppError;

    let temp_dir = TempDir::new().unwrap();
    let repo = open_repo(&temp_dir);

    let goal = Goal::new("goal-1", "Ship", "2024-06-01T00:00:00Z")
        .with_deadline(Some("2024-06-18T00:00:00 UTC".to_string()));
    assert!(matches!(repo.save_goal(goal), Err(AppError::Validation(_))));

    let entry = LogEntry::new("entry-1", "note", "yesterday");
    assert!(matches!(repo.save_entry(entry), Err(AppError::Validation(_))));

    repo.save_goal(
        Goal::new("goal-1", "Ship", "2024-06-01T00:00:00Z")
            .with_deadline(Some("2024-06-18".to_string())),
    )
    .unwrap();
    let update = GoalUpdate {
        deadline: Some(Some("soon".to_string())),
        ..Default::default()
    };
    assert!(matches!(repo.update_goal("goal-1", update), Err(AppError::Validation(_))));

    assert!(repo.list_entries().unwrap().is_empty());
    let goals = repo.list_goals().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].deadline.as_deref(), Some("2024-06-18"));
}
