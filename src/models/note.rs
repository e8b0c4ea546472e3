use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require, ValidationError};

/// A free-text annotation attached to a YouTube video.
///
/// Notes are append-only: once created they are never edited or removed.
/// The video itself lives on YouTube; `video_id` is only a reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    /// External YouTube video id the note belongs to.
    pub video_id: String,
    pub content: String,
    /// Assigned by the server when the note is stored.
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a note. Both fields are required but arrive
/// optional so that missing values can be reported as validation failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteInput {
    pub video_id: Option<String>,
    pub content: Option<String>,
}

/// A note that passed validation and is ready to be stored.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub video_id: String,
    pub content: String,
}

impl CreateNoteInput {
    pub fn validate(self) -> Result<NewNote, ValidationError> {
        match (require(self.video_id), require(self.content)) {
            (Some(video_id), Some(content)) => Ok(NewNote { video_id, content }),
            _ => Err(ValidationError::new("videoId and content required")),
        }
    }
}

/// Query string for listing the notes of one video.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesQuery {
    pub video_id: Option<String>,
}

impl ListNotesQuery {
    pub fn validate(self) -> Result<String, ValidationError> {
        require(self.video_id)
            .ok_or_else(|| ValidationError::new("videoId query parameter required"))
    }
}
