use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use super::NoteRepository;
use crate::{
    error::StoreError,
    models::{Note, NoteChanges},
};

/// In-process note store, used by tests and local runs without PostgreSQL.
///
/// Timestamps have microsecond resolution, like `TIMESTAMPTZ`, and strictly
/// increase across writes so `updated_at` ordering is deterministic.
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    last_stamp: Option<DateTime<Utc>>,
    notes: BTreeMap<i64, Note>,
}

impl State {
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let now = now
            .duration_trunc(TimeDelta::microseconds(1))
            .unwrap_or(now);

        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);

        stamp
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NoteRepository for MemoryRepository {
    async fn list_all(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes: Vec<Note> = self.lock().notes.values().cloned().collect();
        notes.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(notes)
    }

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError> {
        Ok(self.lock().notes.get(&id).cloned())
    }

    async fn create(&self, title: &str, content: &str) -> Result<Note, StoreError> {
        let mut state = self.lock();
        let stamp = state.tick();
        state.last_id += 1;

        let note = Note {
            id: state.last_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: stamp,
            updated_at: stamp,
        };
        state.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Option<Note>, StoreError> {
        let mut state = self.lock();
        let stamp = state.tick();
        let Some(note) = state.notes.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(content) = changes.content {
            note.content = content;
        }
        note.updated_at = stamp;

        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.lock().notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_equal_timestamps() {
        let repo = MemoryRepository::new();
        let a = repo.create("A", "one").await.unwrap();
        let b = repo.create("B", "two").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(repo.get(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::new();
        let first = repo.create("A", "").await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let second = repo.create("B", "").await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(repo.get(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_update_still_advances_updated_at() {
        let repo = MemoryRepository::new();
        let note = repo.create("T", "C").await.unwrap();

        let updated = repo
            .update(note.id, NoteChanges::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "T");
        assert_eq!(updated.content, "C");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn missing_ids_report_absence() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.get(7).await.unwrap(), None);
        assert_eq!(repo.update(7, NoteChanges::default()).await.unwrap(), None);
        assert!(!repo.delete(7).await.unwrap());
    }

    #[tokio::test]
    async fn list_orders_by_most_recent_update() {
        let repo = MemoryRepository::new();
        let a = repo.create("A", "").await.unwrap();
        let b = repo.create("B", "").await.unwrap();

        let listed: Vec<i64> = repo.list_all().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(listed, vec![b.id, a.id]);

        repo.update(a.id, NoteChanges::default()).await.unwrap();
        let listed: Vec<i64> = repo.list_all().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(listed, vec![a.id, b.id]);
    }
}
