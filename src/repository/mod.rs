mod memory;
mod pool;
mod postgres;

pub use memory::MemoryRepository;
pub use pool::{Database, Session};
pub use postgres::PgRepository;

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{Note, NoteChanges},
};

/// Durable CRUD access to notes. Identity and timestamps are assigned here.
///
/// Implementations order listings by `updated_at` descending, ties broken by
/// `id` descending. Every write is a single atomic operation.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Note>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// Both timestamps are set to the same instant.
    async fn create(&self, title: &str, content: &str) -> Result<Note, StoreError>;

    /// Applies only the supplied fields. `updated_at` is refreshed even when
    /// `changes` is empty.
    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Option<Note>, StoreError>;

    /// Returns `false` when no note had this id.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
