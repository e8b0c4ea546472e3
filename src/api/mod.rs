mod error;
mod extract;
mod handlers;

pub use error::{ApiError, ApiResult};
pub use extract::BearerToken;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::activity::ActivityRecorder;
use crate::db::Database;
use crate::youtube::YouTubeClient;

/// Shared handler state. Every field is a cheap clone of a shared handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub youtube: YouTubeClient,
    pub activity: ActivityRecorder,
}

impl AppState {
    pub fn new(db: Database, youtube: YouTubeClient) -> Self {
        let activity = ActivityRecorder::new(db.clone());
        Self {
            db,
            youtube,
            activity,
        }
    }
}

/// Build the API router. `cors_origins` of `None` allows any origin.
pub fn create_router(state: AppState, cors_origins: Option<&[String]>) -> Router {
    let api = Router::new()
        // Notes
        .route("/notes", get(handlers::list_notes))
        .route("/notes", post(handlers::create_note))
        // Event log
        .route("/events", post(handlers::append_event))
        // Videos (YouTube)
        .route("/videos/{video_id}", get(handlers::get_video))
        .route("/videos/{video_id}", put(handlers::update_video))
        .route("/videos/{video_id}/comments", get(handlers::list_comments))
        .route("/videos/{video_id}/comments", post(handlers::post_comment))
        // Comments (YouTube)
        .route("/comments/{comment_id}", delete(handlers::delete_comment))
        .route("/comments/{comment_id}/replies", post(handlers::post_reply))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
