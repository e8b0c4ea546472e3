//! Best-effort audit logging for dashboard actions.
//!
//! After a mutating action succeeds, the handler calls
//! [`ActivityRecorder::record`]. The write to the event log runs on a spawned
//! task and the handler returns immediately. A failed write is logged and
//! dropped; it never changes the outcome of the action that triggered it.

use chrono::Utc;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::db::Database;
use crate::models::{EventType, NewEventLogEntry};

/// One action to record, before it is stamped with the current time.
#[derive(Debug, Clone)]
pub struct Activity {
    pub event_type: EventType,
    pub video_id: Option<String>,
    pub comment_id: Option<String>,
    pub details: Value,
}

impl Activity {
    pub fn new(event_type: EventType, details: Value) -> Self {
        Self {
            event_type,
            video_id: None,
            comment_id: None,
            details,
        }
    }

    pub fn video(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    pub fn comment(mut self, comment_id: impl Into<String>) -> Self {
        self.comment_id = Some(comment_id.into());
        self
    }
}

#[derive(Clone)]
pub struct ActivityRecorder {
    db: Database,
}

impl ActivityRecorder {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Append `activity` to the event log in the background.
    ///
    /// The returned handle resolves once the write has been attempted. Callers
    /// normally drop it.
    pub fn record(&self, activity: Activity) -> JoinHandle<()> {
        let db = self.db.clone();
        let entry = NewEventLogEntry {
            event_type: activity.event_type.as_str().to_string(),
            video_id: activity.video_id,
            comment_id: activity.comment_id,
            user_id: None,
            timestamp: Utc::now(),
            details: Some(activity.details),
        };

        tokio::spawn(async move {
            let event_type = entry.event_type.clone();
            match db.append_event(entry) {
                Ok(stored) => {
                    tracing::debug!(event_type = %stored.event_type, id = %stored.id, "Recorded activity")
                }
                Err(e) => tracing::warn!(%event_type, error = %e, "Failed to record activity"),
            }
        })
    }
}
