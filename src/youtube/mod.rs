//! HTTP client for the YouTube Data API v3.
//!
//! The client is stateless with respect to users: every call takes the
//! caller's OAuth access token and attaches it as a bearer token, so no
//! credential outlives the call. The underlying [`reqwest::Client`] is shared
//! only for connection pooling.
//!
//! Calls are never retried or cached. Whatever YouTube answers with, including
//! quota and auth failures, is handed back to the caller as-is.

mod types;

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use types::*;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Errors from a YouTube call.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// The request never produced a usable response (connect, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// YouTube answered with a non-success status. `body` is its reply verbatim.
    #[error("YouTube API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    base_url: String,
    client: Client,
}

impl YouTubeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, YouTubeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Use an existing reqwest client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated request against an API path.
    fn request(&self, token: &str, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, YouTubeError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(api_error(status, response).await)
        }
    }

    /// Like [`handle_response`](Self::handle_response) for calls answered with 204 No Content.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), YouTubeError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, response).await)
        }
    }

    // ============================================================
    // Videos
    // ============================================================

    /// Fetch the snippet of one video. `None` if YouTube knows no such video
    /// (or the token cannot see it).
    pub async fn get_video_details(
        &self,
        token: &str,
        video_id: &str,
    ) -> Result<Option<VideoResource>, YouTubeError> {
        tracing::debug!(video_id, "Fetching video details");
        let response = self
            .request(token, Method::GET, "/videos")
            .query(&[("part", "snippet"), ("id", video_id)])
            .send()
            .await?;
        let list: ListResponse = self.handle_response(response).await?;
        Ok(list.items.into_iter().next())
    }

    /// Replace a video's title and description in a single update. The category
    /// is always reset to [`DEFAULT_CATEGORY_ID`].
    pub async fn update_video_metadata(
        &self,
        token: &str,
        video_id: &str,
        title: &str,
        description: &str,
    ) -> Result<VideoResource, YouTubeError> {
        tracing::debug!(video_id, "Updating video metadata");
        let body = UpdateVideo {
            id: video_id,
            snippet: VideoSnippetUpdate {
                title,
                description,
                category_id: DEFAULT_CATEGORY_ID,
            },
        };
        let response = self
            .request(token, Method::PUT, "/videos")
            .query(&[("part", "snippet")])
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Comments
    // ============================================================

    /// Up to [`MAX_COMMENT_THREADS`] top-level threads with their replies.
    pub async fn get_comments(
        &self,
        token: &str,
        video_id: &str,
    ) -> Result<Vec<CommentThread>, YouTubeError> {
        tracing::debug!(video_id, "Fetching comment threads");
        let max_results = MAX_COMMENT_THREADS.to_string();
        let response = self
            .request(token, Method::GET, "/commentThreads")
            .query(&[
                ("part", "snippet,replies"),
                ("videoId", video_id),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;
        let list: ListResponse = self.handle_response(response).await?;
        Ok(list.items)
    }

    /// Start a new top-level comment thread on a video.
    pub async fn post_comment(
        &self,
        token: &str,
        video_id: &str,
        text: &str,
    ) -> Result<CommentThread, YouTubeError> {
        let body = InsertCommentThread {
            snippet: CommentThreadSnippet {
                video_id,
                top_level_comment: TopLevelComment {
                    snippet: CommentSnippet {
                        text_original: text,
                    },
                },
            },
        };
        let response = self
            .request(token, Method::POST, "/commentThreads")
            .query(&[("part", "snippet")])
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Reply to an existing top-level comment.
    pub async fn post_reply(
        &self,
        token: &str,
        parent_id: &str,
        text: &str,
    ) -> Result<Comment, YouTubeError> {
        let body = InsertReply {
            snippet: ReplySnippet {
                parent_id,
                text_original: text,
            },
        };
        let response = self
            .request(token, Method::POST, "/comments")
            .query(&[("part", "snippet")])
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a top-level comment or a reply. The id travels in the query
    /// string, which is what the API expects.
    pub async fn delete_comment(&self, token: &str, comment_id: &str) -> Result<(), YouTubeError> {
        let response = self
            .request(token, Method::DELETE, "/comments")
            .query(&[("id", comment_id)])
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}

async fn api_error(status: StatusCode, response: reqwest::Response) -> YouTubeError {
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, "YouTube API request failed");
    YouTubeError::Api { status, body }
}
