mod extract;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, ErrorResponse, FieldError, HealthResponse, NoteResponse,
        UpdateNoteRequest, ValidationErrorResponse,
    },
    service::NoteService,
};

use extract::{NoteId, ValidJson};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        description = "Simple Notes CRUD API backed by PostgreSQL.",
        version = "1.0.0"
    ),
    paths(
        health_check,
        create_note,
        update_note,
        delete_note,
        get_one_note,
        get_all_notes
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        HealthResponse,
        ErrorResponse,
        FieldError,
        ValidationErrorResponse
    )),
    tags(
        (name = "health", description = "Service health and status"),
        (name = "notes", description = "Operations on notes (CRUD)")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
#[debug_handler]
pub async fn health_check() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            message: "Healthy".to_string(),
        }),
    )
        .into_response()
}

/// Unknown paths.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            detail: "Not Found".to_string(),
        }),
    )
        .into_response()
}

/// Known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            detail: "Method Not Allowed".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    ValidJson(payload): ValidJson<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
    ValidJson(payload): ValidJson<UpdateNoteRequest>,
) -> Response {
    match service.update_note(id, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted successfully"),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Invalid note ID", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, NoteId(id): NoteId) -> Response {
    match service.delete_note(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Invalid note ID", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
) -> Response {
    match service.get_one_note(id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes, most recently updated first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => e.into_response(),
    }
}
