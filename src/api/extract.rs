//! Request extractors shared by the handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::error::ApiError;

/// The caller's YouTube OAuth access token, taken from
/// `Authorization: Bearer <token>`.
///
/// The token is forwarded to YouTube for the duration of one request and is
/// never stored.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    fn from_header(header: &str) -> Option<Self> {
        let token = header.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match header.and_then(BearerToken::from_header) {
            Some(token) => Ok(token),
            None => {
                tracing::warn!("Missing or malformed Authorization header");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
