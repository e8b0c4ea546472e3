//! A stand-in for the YouTube Data API.
//!
//! Serves canned responses on an ephemeral local port and records every
//! request it receives so tests can assert on method, path, query, headers
//! and body.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use tubedash::db::Database;
use tubedash::youtube::YouTubeClient;

const API_PREFIX: &str = "/youtube/v3";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
}

#[derive(Clone, Default)]
pub struct FakeYouTube {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<(Method, String), CannedResponse>>>,
}

impl FakeYouTube {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) -> &Self {
        self.respond_raw(method, path, status, &body.to_string())
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: StatusCode, body: &str) -> &Self {
        self.responses.lock().unwrap().insert(
            (method, path.to_string()),
            CannedResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Serve on 127.0.0.1 and return the API base URL.
    pub async fn start(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}{}", addr, API_PREFIX)
    }

    /// Serve and return a client pointed at this fake.
    pub async fn client(&self) -> YouTubeClient {
        let base_url = self.start().await;
        YouTubeClient::new(base_url, Duration::from_secs(5)).unwrap()
    }
}

async fn handle(
    State(fake): State<FakeYouTube>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    fake.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query,
        authorization: header_value(header::AUTHORIZATION),
        accept: header_value(header::ACCEPT),
        body: serde_json::from_slice(&body).ok(),
    });

    let canned = fake
        .responses
        .lock()
        .unwrap()
        .get(&(method.clone(), path))
        .cloned();

    match canned {
        Some(c) => (
            c.status,
            [(header::CONTENT_TYPE, "application/json")],
            c.body,
        )
            .into_response(),
        None if method == Method::DELETE => StatusCode::NO_CONTENT.into_response(),
        None => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            "{}",
        )
            .into_response(),
    }
}

/// Poll until the event log holds `expected` rows. Activity is recorded on a
/// background task, so it can land shortly after the response.
pub async fn wait_for_events(db: &Database, expected: i64) -> i64 {
    let mut count = 0;
    for _ in 0..100 {
        count = db.count_events().unwrap();
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    count
}
