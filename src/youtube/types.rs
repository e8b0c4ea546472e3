//! Wire shapes for the YouTube Data API v3.
//!
//! Resources coming back from YouTube are kept as opaque JSON and handed to
//! callers verbatim. Only the request bodies we send, and the `items` envelope
//! we unwrap on list calls, are typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `youtube#video` resource.
pub type VideoResource = Value;

/// A `youtube#commentThread` resource: a top-level comment plus its replies.
pub type CommentThread = Value;

/// A `youtube#comment` resource.
pub type Comment = Value;

/// The category sent with every metadata update ("People & Blogs").
pub const DEFAULT_CATEGORY_ID: u32 = 22;

/// Maximum number of comment threads fetched per video.
pub const MAX_COMMENT_THREADS: u32 = 50;

/// Envelope of every list response. `items` is omitted by YouTube when empty.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet<'a> {
    pub text_original: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopLevelComment<'a> {
    pub snippet: CommentSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadSnippet<'a> {
    pub video_id: &'a str,
    pub top_level_comment: TopLevelComment<'a>,
}

/// Body of `POST /commentThreads`.
#[derive(Debug, Serialize)]
pub(crate) struct InsertCommentThread<'a> {
    pub snippet: CommentThreadSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReplySnippet<'a> {
    pub parent_id: &'a str,
    pub text_original: &'a str,
}

/// Body of `POST /comments`.
#[derive(Debug, Serialize)]
pub(crate) struct InsertReply<'a> {
    pub snippet: ReplySnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoSnippetUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category_id: u32,
}

/// Body of `PUT /videos`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateVideo<'a> {
    pub id: &'a str,
    pub snippet: VideoSnippetUpdate<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comment_thread_body_nests_text_under_top_level_comment() {
        let body = InsertCommentThread {
            snippet: CommentThreadSnippet {
                video_id: "abc123",
                top_level_comment: TopLevelComment {
                    snippet: CommentSnippet {
                        text_original: "Great video",
                    },
                },
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "snippet": {
                    "videoId": "abc123",
                    "topLevelComment": { "snippet": { "textOriginal": "Great video" } }
                }
            })
        );
    }

    #[test]
    fn update_body_carries_fixed_category() {
        let body = UpdateVideo {
            id: "abc123",
            snippet: VideoSnippetUpdate {
                title: "New Title",
                description: "New Desc",
                category_id: DEFAULT_CATEGORY_ID,
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "id": "abc123",
                "snippet": { "title": "New Title", "description": "New Desc", "categoryId": 22 }
            })
        );
    }

    #[test]
    fn list_response_tolerates_missing_items() {
        let parsed: ListResponse = serde_json::from_str(r#"{"kind":"youtube#videoListResponse"}"#).unwrap();
        assert!(parsed.items.is_empty());
    }
}
