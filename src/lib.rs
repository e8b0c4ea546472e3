//! Backend for a YouTube companion dashboard.
//!
//! - [`youtube`]: stateless proxy to the YouTube Data API, authenticated per
//!   call with the user's own OAuth token.
//! - [`db`]: SQLite store for video notes and the action event log.
//! - [`activity`]: best-effort audit logging after mutating actions.
//! - [`api`]: the axum router tying them together.

pub mod activity;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod youtube;
