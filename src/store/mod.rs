//! The entry/goal repository.
//!
//! Analytics never reach into storage on their own: callers take a snapshot
//! through [`Repository::list_entries`] / [`Repository::list_goals`] and pass
//! it in. Writes replace a whole collection, so two writers racing on the same
//! store resolve as last write wins.
//!
//! [`KvRepository`] implements the trait on top of any [`KeyValueBackend`],
//! storing each collection as a JSON array under its own key. Two backends
//! ship with the crate: [`MemoryBackend`] and the SQLite
//! [`Database`](crate::db::Database).

pub mod memory;

pub use memory::MemoryBackend;

use crate::constants::{STORAGE_KEY_ENTRIES, STORAGE_KEY_GOALS};
use crate::errors::{AppError, AppResult};
use crate::models::{Goal, GoalStatus, LogEntry};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// What changed in the store. Sent to every subscribed listener after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Entries,
    Goals,
    Cleared,
}

/// Callback invoked after the store changes.
pub type ChangeListener = Box<dyn Fn(StoreChange) + Send + Sync>;

type SharedListener = Arc<dyn Fn(StoreChange) + Send + Sync>;

/// Partial update of an entry. `None` leaves a field untouched; the nested
/// `Option` on optional fields lets a caller clear them. `id` and `createdAt`
/// cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub source: Option<Option<String>>,
    pub source_name: Option<Option<String>>,
    pub goal_id: Option<Option<String>>,
}

impl EntryUpdate {
    fn apply(self, entry: &mut LogEntry) {
        if let Some(content) = self.content {
            entry.content = content;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags;
        }
        if let Some(source) = self.source {
            entry.source = source;
        }
        if let Some(source_name) = self.source_name {
            entry.source_name = source_name;
        }
        if let Some(goal_id) = self.goal_id {
            entry.goal_id = goal_id;
        }
    }
}

/// Partial update of a goal, with the same conventions as [`EntryUpdate`].
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<String>>,
    pub related_tags: Option<Vec<String>>,
    pub target_entries: Option<Option<i64>>,
    pub status: Option<GoalStatus>,
}

impl GoalUpdate {
    /// Update that only changes the status.
    pub fn status(status: GoalStatus) -> Self {
        GoalUpdate {
            status: Some(status),
            ..Default::default()
        }
    }

    fn apply(self, goal: &mut Goal) {
        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(description) = self.description {
            goal.description = description;
        }
        if let Some(deadline) = self.deadline {
            goal.deadline = deadline;
        }
        if let Some(related_tags) = self.related_tags {
            goal.related_tags = related_tags;
        }
        if let Some(target_entries) = self.target_entries {
            goal.target_entries = target_entries;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
    }
}

/// Capability set of the entry/goal store.
pub trait Repository {
    /// All entries, newest first by insertion.
    fn list_entries(&self) -> AppResult<Vec<LogEntry>>;

    /// All goals, newest first by insertion.
    fn list_goals(&self) -> AppResult<Vec<Goal>>;

    /// Adds an entry at the front of the collection.
    fn save_entry(&self, entry: LogEntry) -> AppResult<()>;

    /// Applies `update` to the entry with `id`. Returns the updated entry, or
    /// `None` if no entry has that id.
    fn update_entry(&self, id: &str, update: EntryUpdate) -> AppResult<Option<LogEntry>>;

    /// Removes the entry with `id`. Returns whether anything was removed.
    fn delete_entry(&self, id: &str) -> AppResult<bool>;

    /// Adds a goal at the front of the collection.
    fn save_goal(&self, goal: Goal) -> AppResult<()>;

    /// Applies `update` to the goal with `id`.
    fn update_goal(&self, id: &str, update: GoalUpdate) -> AppResult<Option<Goal>>;

    /// Removes the goal with `id`. Entries linked to it are left alone.
    fn delete_goal(&self, id: &str) -> AppResult<bool>;

    /// Removes every entry and goal.
    fn clear_all(&self) -> AppResult<()>;

    /// Registers a listener called after every successful write.
    fn subscribe(&self, listener: ChangeListener);
}

/// Raw string storage addressed by key.
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Removes every key in `keys` as one write: either all are gone
    /// afterwards or none are.
    fn remove_all(&self, keys: &[&str]) -> AppResult<()>;
}

/// [`Repository`] over a key-value backend, one JSON array per collection.
pub struct KvRepository<B: KeyValueBackend> {
    backend: B,
    listeners: Mutex<Vec<SharedListener>>,
}

impl<B: KeyValueBackend> KvRepository<B> {
    pub fn new(backend: B) -> Self {
        KvRepository {
            backend,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        match self.backend.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(items)?;
        self.backend.set(key, &raw)
    }

    /// Calls every listener registered so far. The lock is released first,
    /// so a listener may subscribe further listeners; those hear the next change.
    fn notify(&self, change: StoreChange) {
        debug!("Store changed: {:?}", change);
        let listeners: Vec<SharedListener> = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for listener in &listeners {
            listener(change);
        }
    }
}

impl<B: KeyValueBackend> Repository for KvRepository<B> {
    fn list_entries(&self) -> AppResult<Vec<LogEntry>> {
        self.read_collection(STORAGE_KEY_ENTRIES)
    }

    fn list_goals(&self) -> AppResult<Vec<Goal>> {
        self.read_collection(STORAGE_KEY_GOALS)
    }

    fn save_entry(&self, entry: LogEntry) -> AppResult<()> {
        entry.validate()?;

        let mut entries = self.list_entries()?;
        if entries.iter().any(|e| e.id == entry.id) {
            return Err(AppError::Validation(format!(
                "an entry with id {} already exists",
                entry.id
            )));
        }

        info!("Saving entry {}", entry.id);
        entries.insert(0, entry);
        self.write_collection(STORAGE_KEY_ENTRIES, &entries)?;
        self.notify(StoreChange::Entries);
        Ok(())
    }

    fn update_entry(&self, id: &str, update: EntryUpdate) -> AppResult<Option<LogEntry>> {
        let mut entries = self.list_entries()?;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            debug!("No entry with id {} to update", id);
            return Ok(None);
        };

        update.apply(entry);
        entry.validate()?;
        let updated = entry.clone();

        self.write_collection(STORAGE_KEY_ENTRIES, &entries)?;
        self.notify(StoreChange::Entries);
        Ok(Some(updated))
    }

    fn delete_entry(&self, id: &str) -> AppResult<bool> {
        let mut entries = self.list_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }

        info!("Deleting entry {}", id);
        self.write_collection(STORAGE_KEY_ENTRIES, &entries)?;
        self.notify(StoreChange::Entries);
        Ok(true)
    }

    fn save_goal(&self, goal: Goal) -> AppResult<()> {
        goal.validate()?;

        let mut goals = self.list_goals()?;
        if goals.iter().any(|g| g.id == goal.id) {
            return Err(AppError::Validation(format!(
                "a goal with id {} already exists",
                goal.id
            )));
        }

        info!("Saving goal {}", goal.id);
        goals.insert(0, goal);
        self.write_collection(STORAGE_KEY_GOALS, &goals)?;
        self.notify(StoreChange::Goals);
        Ok(())
    }

    fn update_goal(&self, id: &str, update: GoalUpdate) -> AppResult<Option<Goal>> {
        let mut goals = self.list_goals()?;
        let Some(goal) = goals.iter_mut().find(|g| g.id == id) else {
            debug!("No goal with id {} to update", id);
            return Ok(None);
        };

        update.apply(goal);
        goal.validate()?;
        let updated = goal.clone();

        self.write_collection(STORAGE_KEY_GOALS, &goals)?;
        self.notify(StoreChange::Goals);
        Ok(Some(updated))
    }

    fn delete_goal(&self, id: &str) -> AppResult<bool> {
        let mut goals = self.list_goals()?;
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() == before {
            return Ok(false);
        }

        info!("Deleting goal {}", id);
        self.write_collection(STORAGE_KEY_GOALS, &goals)?;
        self.notify(StoreChange::Goals);
        Ok(true)
    }

    fn clear_all(&self) -> AppResult<()> {
        info!("Clearing all entries and goals");
        self.backend
            .remove_all(&[STORAGE_KEY_ENTRIES, STORAGE_KEY_GOALS])?;
        self.notify(StoreChange::Cleared);
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::from(listener));
    }
}
