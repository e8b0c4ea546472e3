use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{require, ValidationError};

/// One row of the append-only audit trail of user actions.
///
/// Only `event_type` and `timestamp` are guaranteed; the remaining references
/// are filled in when the action concerned a particular video, comment or user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub id: Uuid,
    pub event_type: String,
    pub video_id: Option<String>,
    pub comment_id: Option<String>,
    pub user_id: Option<String>,
    /// When the action happened, as reported by the caller.
    pub timestamp: DateTime<Utc>,
    /// Free-form payload, stored without interpretation.
    pub details: Option<Value>,
}

/// The action tags the dashboard itself emits.
///
/// The event log accepts any tag. `NoteAdded` is sent by the dashboard
/// itself; the rest are recorded by the server after a YouTube action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CommentAdded,
    CommentReplied,
    CommentDeleted,
    VideoMetadataUpdated,
    NoteAdded,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommentAdded => "comment_added",
            Self::CommentReplied => "comment_replied",
            Self::CommentDeleted => "comment_deleted",
            Self::VideoMetadataUpdated => "video_metadata_updated",
            Self::NoteAdded => "note_added",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamp as sent by a client: either an ISO-8601 string or
/// milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTimestamp {
    Millis(i64),
    Text(String),
}

impl EventTimestamp {
    /// An empty string or a zero epoch counts as no timestamp at all.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Millis(ms) => *ms == 0,
            Self::Text(raw) => raw.is_empty(),
        }
    }

    pub fn parse(&self) -> Result<DateTime<Utc>, ValidationError> {
        let parsed = match self {
            Self::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms),
            Self::Text(raw) => parse_iso8601(raw),
        };
        parsed.ok_or_else(|| ValidationError::new("timestamp is not a valid date-time"))
    }
}

/// Accepts RFC 3339 (`2024-01-01T00:00:00.000Z`), a date-time without an
/// offset, or a bare date. Values without an offset are read as UTC.
fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Request body for appending to the event log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendEventInput {
    pub event_type: Option<String>,
    pub video_id: Option<String>,
    pub comment_id: Option<String>,
    pub user_id: Option<String>,
    pub timestamp: Option<EventTimestamp>,
    pub details: Option<Value>,
}

/// An event that passed validation and is ready to be stored.
#[derive(Debug, Clone)]
pub struct NewEventLogEntry {
    pub event_type: String,
    pub video_id: Option<String>,
    pub comment_id: Option<String>,
    pub user_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub details: Option<Value>,
}

impl AppendEventInput {
    pub fn validate(self) -> Result<NewEventLogEntry, ValidationError> {
        let event_type = require(self.event_type);
        let (Some(event_type), Some(timestamp)) = (event_type, self.timestamp) else {
            return Err(ValidationError::new("eventType and timestamp required"));
        };
        if timestamp.is_blank() {
            return Err(ValidationError::new("eventType and timestamp required"));
        }

        Ok(NewEventLogEntry {
            event_type,
            video_id: self.video_id,
            comment_id: self.comment_id,
            user_id: self.user_id,
            timestamp: timestamp.parse()?,
            details: self.details.filter(|d| !d.is_null()),
        })
    }
}
