use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde_json::Value;

use crate::{
    dto::{FieldError, FromJsonBody},
    error::ServiceError,
};

/// JSON body checked field by field; problems come back as 422 with one
/// entry per offending field.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: FromJsonBody,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        T::from_json(body).map(Self).map_err(ServiceError::Validation)
    }
}

fn body_rejection(rejection: JsonRejection) -> ServiceError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::debug!("rejected oversized request body: {rejection}");
        return ServiceError::PayloadTooLarge;
    }

    let kind = match &rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => "json_invalid",
        JsonRejection::MissingJsonContentType(_) => "missing_json_content_type",
        _ => "body_unreadable",
    };
    tracing::debug!("rejected request body: {rejection}");

    ServiceError::Validation(vec![FieldError::new(
        &["body"],
        rejection.body_text(),
        kind,
    )])
}

/// Integer `{id}` path segment; anything else is a 422.
pub struct NoteId(pub i64);

impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                let kind = match &rejection {
                    PathRejection::FailedToDeserializePathParams(_) => "int_parsing",
                    _ => "path_missing",
                };

                Err(ServiceError::Validation(vec![FieldError::new(
                    &["path", "id"],
                    rejection.body_text(),
                    kind,
                )]))
            }
        }
    }
}
