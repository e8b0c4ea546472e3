//! Domain models for tubedash.
//!
//! # Core Concepts
//!
//! - [`Note`]: Free-text annotation attached to a YouTube video. Append-only.
//! - [`EventLogEntry`]: Audit trail row recording a user action such as posting
//!   a comment or editing video metadata. Append-only.
//!
//! Videos and comments themselves are owned by YouTube and never stored here;
//! see [`crate::youtube`] for the proxy that reads and mutates them.

mod event;
mod note;

pub use event::*;
pub use note::*;

/// A required request field was missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Treats an empty string the same as an absent one.
pub(crate) fn require(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
