//! Error type for HTTP handlers.
//!
//! Validation failures are shown to the client as-is. Internal failures are
//! logged server-side with full detail while the client only sees a generic
//! message. YouTube failures are relayed with YouTube's own status and body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::ValidationError;
use crate::youtube::YouTubeError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No usable `Authorization: Bearer` header on a YouTube-backed route.
    #[error("Missing or malformed bearer token")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    /// YouTube rejected the call. Relayed to the client verbatim.
    #[error("YouTube API returned {status}")]
    ExternalApi { status: StatusCode, body: String },

    /// YouTube could not be reached or its reply could not be read.
    #[error("YouTube API request failed: {0}")]
    Upstream(reqwest::Error),

    /// Storage or other unexpected failure. Only `public` reaches the client.
    #[error("{public}: {cause}")]
    Internal {
        public: &'static str,
        cause: anyhow::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Adapter for `map_err` that wraps a storage error with a client-safe message.
    pub fn internal(public: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |cause| Self::Internal { public, cause }
    }
}

impl From<YouTubeError> for ApiError {
    fn from(e: YouTubeError) -> Self {
        match e {
            YouTubeError::Api { status, body } => Self::ExternalApi { status, body },
            YouTubeError::Http(e) => Self::Upstream(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::new(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(ValidationError::new(rejection.body_text()))
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                error_body(StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::Unauthorized => error_body(StatusCode::UNAUTHORIZED, self.to_string()),
            Self::NotFound(msg) => error_body(StatusCode::NOT_FOUND, msg),
            Self::ExternalApi { status, body } => {
                let content_type = if serde_json::from_str::<serde_json::Value>(&body).is_ok() {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                (status, [(CONTENT_TYPE, content_type)], body).into_response()
            }
            Self::Upstream(e) => {
                tracing::error!("YouTube API unreachable: {}", e);
                error_body(StatusCode::BAD_GATEWAY, "YouTube API unreachable")
            }
            Self::Internal { public, cause } => {
                tracing::error!("Internal error: {}: {:#}", public, cause);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, public)
            }
        }
    }
}
