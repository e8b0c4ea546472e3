//! Dashboard routes backed by the YouTube Data API.
//!
//! Each handler validates its input, forwards the call with the caller's own
//! OAuth token, and on success records the action in the event log. YouTube
//! resources are returned exactly as YouTube sent them.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::activity::Activity;
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::BearerToken;
use crate::api::AppState;
use crate::models::{EventType, ValidationError};
use crate::youtube::{Comment, CommentThread, VideoResource};

/// Body for posting a top-level comment.
#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    #[serde(default)]
    pub text: String,
}

/// Body for replying to a comment. `video_id` only enriches the audit entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReplyRequest {
    #[serde(default)]
    pub text: String,
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentQuery {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

fn require_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::new("text required"))
    } else {
        Ok(())
    }
}

// ============================================================
// Videos
// ============================================================

pub async fn get_video(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(video_id): Path<String>,
) -> ApiResult<Json<VideoResource>> {
    state
        .youtube
        .get_video_details(&token, &video_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))
}

pub async fn update_video(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(video_id): Path<String>,
    input: Result<Json<UpdateVideoRequest>, JsonRejection>,
) -> ApiResult<Json<VideoResource>> {
    let Json(input) = input?;
    if input.title.trim().is_empty() {
        return Err(ValidationError::new("Title is required").into());
    }

    let video = state
        .youtube
        .update_video_metadata(&token, &video_id, &input.title, &input.description)
        .await?;

    state.activity.record(
        Activity::new(
            EventType::VideoMetadataUpdated,
            json!({
                "videoId": video_id,
                "title": input.title,
                "description": input.description,
            }),
        )
        .video(&video_id),
    );

    Ok(Json(video))
}

// ============================================================
// Comments
// ============================================================

pub async fn list_comments(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Vec<CommentThread>>> {
    Ok(Json(state.youtube.get_comments(&token, &video_id).await?))
}

pub async fn post_comment(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(video_id): Path<String>,
    input: Result<Json<PostCommentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommentThread>)> {
    let Json(input) = input?;
    require_text(&input.text)?;

    let thread = state
        .youtube
        .post_comment(&token, &video_id, &input.text)
        .await?;

    state.activity.record(
        Activity::new(
            EventType::CommentAdded,
            json!({ "videoId": video_id, "content": input.text }),
        )
        .video(&video_id),
    );

    Ok((StatusCode::CREATED, Json(thread)))
}

pub async fn post_reply(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(parent_id): Path<String>,
    input: Result<Json<PostReplyRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let Json(input) = input?;
    require_text(&input.text)?;

    let reply = state
        .youtube
        .post_reply(&token, &parent_id, &input.text)
        .await?;

    let mut activity = Activity::new(
        EventType::CommentReplied,
        json!({
            "videoId": input.video_id,
            "parentId": parent_id,
            "content": input.text,
        }),
    )
    .comment(&parent_id);
    if let Some(video_id) = input.video_id {
        activity = activity.video(video_id);
    }
    state.activity.record(activity);

    Ok((StatusCode::CREATED, Json(reply)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(comment_id): Path<String>,
    Query(query): Query<DeleteCommentQuery>,
) -> ApiResult<StatusCode> {
    state.youtube.delete_comment(&token, &comment_id).await?;

    let mut activity = Activity::new(
        EventType::CommentDeleted,
        json!({ "videoId": query.video_id, "commentId": comment_id }),
    )
    .comment(&comment_id);
    if let Some(video_id) = query.video_id {
        activity = activity.video(video_id);
    }
    state.activity.record(activity);

    Ok(StatusCode::NO_CONTENT)
}
