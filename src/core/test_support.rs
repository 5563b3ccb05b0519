use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

pub const ATOM_FIXTURE: &str = include_str!("../../fixtures/status-history.atom");

pub const EMPTY_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>tag:status.example.com,2005:/history</id>
  <title>Example Status - Incident History</title>
  <updated>2024-01-01T00:00:00Z</updated>
</feed>"#;

#[derive(Debug, Clone)]
pub struct FeedResponse {
    status: StatusCode,
    body: String,
}

impl FeedResponse {
    pub fn atom(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            status: StatusCode::from_u16(code).expect("status code must be valid"),
            body: "temporary failure".to_string(),
        }
    }
}

#[derive(Clone)]
struct ServerState {
    responses: Arc<Vec<FeedResponse>>,
    request_count: Arc<AtomicUsize>,
}

pub struct FeedServer {
    pub url: String,
    request_count: Arc<AtomicUsize>,
    join_handle: tokio::task::JoinHandle<()>,
}

impl FeedServer {
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Drop for FeedServer {
    fn drop(&mut self) {
        self.join_handle.abort();
    }
}

async fn feed_handler(State(state): State<ServerState>) -> Response {
    let counter = state.request_count.fetch_add(1, Ordering::SeqCst);
    let scripted = state
        .responses
        .get(counter)
        .or_else(|| state.responses.last())
        .cloned()
        .unwrap_or_else(|| FeedResponse::status(404));

    let mut response = Response::new(axum::body::Body::from(scripted.body));
    *response.status_mut() = scripted.status;
    response.headers_mut().insert(
        reqwest::header::CONTENT_TYPE,
        "application/atom+xml".parse().expect("header must parse"),
    );
    response
}

/// Serves `responses` in order from `/history.atom`, repeating the last one
/// once the script runs out.
pub async fn spawn_feed_server(responses: Vec<FeedResponse>) -> FeedServer {
    let request_count = Arc::new(AtomicUsize::new(0));
    let state = ServerState {
        responses: Arc::new(responses),
        request_count: Arc::clone(&request_count),
    };
    let app = Router::new()
        .route("/history.atom", get(feed_handler))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    let join_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    FeedServer {
        url: format!("http://{address}/history.atom"),
        request_count,
        join_handle,
    }
}
