use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    error::ServiceError,
    repository::NoteRepository,
};

use std::sync::Arc;

/// Validates requests, delegates to the store and turns absence into
/// [`ServiceError::NotFound`]. Nothing reaches the store unvalidated.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        request.validate().map_err(ServiceError::Validation)?;

        let note = self.repo.create(&request.title, &request.content).await?;
        tracing::info!("created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        request.validate().map_err(ServiceError::Validation)?;

        let note = self
            .repo
            .update(id, request.into())
            .await?
            .ok_or(ServiceError::NotFound)?;
        tracing::info!("updated note {}", note.id);

        Ok(note.into())
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            tracing::info!("deleted note {id}");
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, ServiceError> {
        self.repo
            .get(id)
            .await?
            .map(NoteResponse::from)
            .ok_or(ServiceError::NotFound)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.repo.list_all().await?;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }
}
