use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::models::{Note, NoteChanges};

pub const TITLE_MIN_CHARS: usize = 1;
pub const TITLE_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Unique identifier of the note
    pub id: i64,
    /// Title of the note
    pub title: String,
    /// Content of the note
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Title of the note
    #[schema(min_length = 1, max_length = 255)]
    pub title: String,
    /// Content of the note
    pub content: String,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = check_title(&self.title).into_iter().collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl FromJsonBody for CreateNoteRequest {
    fn from_json(body: Value) -> Result<Self, Vec<FieldError>> {
        let mut map = body_object(body)?;
        let mut errors = Vec::new();

        let title = take_string(&mut map, "title", true, &mut errors);
        errors.extend(title.as_deref().and_then(check_title));
        let content = take_string(&mut map, "content", true, &mut errors);

        match (title, content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(Self { title, content }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Updated title of the note
    #[schema(min_length = 1, max_length = 255)]
    #[serde(default)]
    pub title: Option<String>,
    /// Updated content of the note
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdateNoteRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .title
            .as_deref()
            .and_then(check_title)
            .into_iter()
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl FromJsonBody for UpdateNoteRequest {
    fn from_json(body: Value) -> Result<Self, Vec<FieldError>> {
        let mut map = body_object(body)?;
        let mut errors = Vec::new();

        let title = take_string(&mut map, "title", false, &mut errors);
        errors.extend(title.as_deref().and_then(check_title));
        let content = take_string(&mut map, "content", false, &mut errors);

        if errors.is_empty() {
            Ok(Self { title, content })
        } else {
            Err(errors)
        }
    }
}

impl From<UpdateNoteRequest> for NoteChanges {
    fn from(request: UpdateNoteRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

/// One entry of a 422 response: where the problem is and what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Location of the offending value, e.g. `["body", "title"]`
    pub loc: Vec<String>,
    /// Human readable message
    pub msg: String,
    /// Machine readable error kind
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(ToString::to_string).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Request bodies built from raw JSON, so that every offending field is
/// reported in one response rather than only the first.
pub trait FromJsonBody: Sized {
    fn from_json(body: Value) -> Result<Self, Vec<FieldError>>;
}

fn body_object(body: Value) -> Result<Map<String, Value>, Vec<FieldError>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(vec![FieldError::new(
            &["body"],
            "Input should be a valid dictionary or object",
            "model_attributes_type",
        )]),
    }
}

/// Optional fields treat `null` as absent.
fn take_string(
    map: &mut Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match map.remove(field) {
        Some(Value::String(value)) => Some(value),
        None | Some(Value::Null) if !required => None,
        None => {
            errors.push(FieldError::new(&["body", field], "Field required", "missing"));
            None
        }
        Some(_) => {
            errors.push(FieldError::new(
                &["body", field],
                "Input should be a valid string",
                "string_type",
            ));
            None
        }
    }
}

fn check_title(title: &str) -> Option<FieldError> {
    let chars = title.chars().count();

    if chars < TITLE_MIN_CHARS {
        Some(FieldError::new(
            &["body", "title"],
            format!("String should have at least {TITLE_MIN_CHARS} character"),
            "string_too_short",
        ))
    } else if chars > TITLE_MAX_CHARS {
        Some(FieldError::new(
            &["body", "title"],
            format!("String should have at most {TITLE_MAX_CHARS} characters"),
            "string_too_long",
        ))
    } else {
        None
    }
}
