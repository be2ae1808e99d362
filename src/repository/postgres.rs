use async_trait::async_trait;
use tokio_postgres::Row;

use super::{Database, NoteRepository};
use crate::{
    error::StoreError,
    models::{Note, NoteChanges},
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL CHECK (char_length(title) >= 1),
    content TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS notes_updated_at_idx ON notes (updated_at DESC, id DESC);
";

pub struct PgRepository {
    db: Database,
}

impl PgRepository {
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates the `notes` table and its index when missing. Safe to run on
    /// every startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let session = self.db.session().await?;
        session.batch_execute(SCHEMA).await?;

        tracing::info!("notes schema is in place");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteRepository for PgRepository {
    async fn list_all(&self) -> Result<Vec<Note>, StoreError> {
        let session = self.db.session().await?;
        let rows = session
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes \
                 ORDER BY updated_at DESC, id DESC",
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let session = self.db.session().await?;
        let row = session
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn create(&self, title: &str, content: &str) -> Result<Note, StoreError> {
        let session = self.db.session().await?;
        let row = session
            .query_one(
                "INSERT INTO notes (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, created_at, updated_at",
                &[&title, &content],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Option<Note>, StoreError> {
        let session = self.db.session().await?;
        let row = session
            .query_opt(
                "UPDATE notes SET title = COALESCE($1, title), content = COALESCE($2, content), \
                 updated_at = now() WHERE id = $3 \
                 RETURNING id, title, content, created_at, updated_at",
                &[&changes.title, &changes.content, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let session = self.db.session().await?;
        let rows = session
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
