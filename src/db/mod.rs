mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::models::*;

/// Handle to the SQLite store holding notes and the event log.
///
/// Cloning is cheap; all clones share one connection guarded by a mutex.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "tubedash")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("tubedash.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Note operations
    // ============================================================

    /// All notes for a video, newest first.
    pub fn get_notes_by_video(&self, video_id: &str) -> Result<Vec<Note>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, video_id, content, created_at
             FROM notes WHERE video_id = ? ORDER BY created_at DESC, rowid DESC",
        )?;

        let notes = stmt
            .query_map([video_id], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn create_note(&self, input: NewNote) -> Result<Note> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();
        let created_at = format_datetime(now);

        conn.execute(
            "INSERT INTO notes (id, video_id, content, created_at) VALUES (?, ?, ?, ?)",
            (id.to_string(), &input.video_id, &input.content, &created_at),
        )?;

        Ok(Note {
            id,
            video_id: input.video_id,
            content: input.content,
            created_at: parse_datetime(&created_at)?,
        })
    }

    pub fn count_notes(&self) -> Result<i64> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }

    // ============================================================
    // Event log operations
    // ============================================================

    pub fn append_event(&self, input: NewEventLogEntry) -> Result<EventLogEntry> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();

        let details_json = input
            .details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        conn.execute(
            "INSERT INTO event_log (id, event_type, video_id, comment_id, user_id, timestamp, details)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.event_type,
                &input.video_id,
                &input.comment_id,
                &input.user_id,
                format_datetime(input.timestamp),
                &details_json,
            ),
        )?;

        Ok(EventLogEntry {
            id,
            event_type: input.event_type,
            video_id: input.video_id,
            comment_id: input.comment_id,
            user_id: input.user_id,
            timestamp: input.timestamp,
            details: input.details,
        })
    }

    pub fn count_events(&self) -> Result<i64> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count = conn.query_row("SELECT COUNT(*) FROM event_log", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: parse_uuid(row.get::<_, String>(0)?),
        video_id: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?,
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

/// Fixed-width UTC form so that lexical order in SQLite is chronological order.
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid stored timestamp: {}", s))?;
    Ok(dt.with_timezone(&Utc))
}
