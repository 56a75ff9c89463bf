use serde::{Deserialize, Serialize};

use crate::entity::note;

use super::schema::{Schema, ValidationError};

pub const CONTENT_MIN_LENGTH: usize = 5;

#[derive(Deserialize, Default, Clone, Debug, utoipa::ToSchema)]
pub struct NoteRequest {
    #[schema(example = "HTML is easy")]
    pub content: Option<String>,
    pub important: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub content: String,
    pub important: bool,
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct NoteResponse {
    pub id: String,
    pub content: String,
    pub important: bool,
}

impl NoteRequest {
    /// Used for both create and replace; `important` defaults to false.
    pub fn validate(self) -> Result<NewNote, ValidationError> {
        let mut schema = Schema::new("Note");
        let content = schema.required("content", self.content, "content is required");
        schema.min_length(
            "content",
            content.as_deref(),
            CONTENT_MIN_LENGTH,
            "content must be at least 5 characters long",
        );
        schema.finish()?;

        Ok(NewNote {
            content: content.unwrap_or_default(),
            important: self.important.unwrap_or(false),
        })
    }
}

impl From<note::Model> for NoteResponse {
    fn from(m: note::Model) -> Self {
        Self {
            id: m.id.to_string(),
            content: m.content,
            important: m.important,
        }
    }
}
