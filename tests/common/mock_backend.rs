//! Mock TheCatAPI server for exercising the real HTTP transport.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.as_bytes().to_vec(),
            delay_ms: 0,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!(r#"{{"message": "status {}"}}"#, status).into_bytes(),
            delay_ms: 0,
        }
    }

    pub fn empty() -> Self {
        Self {
            status: 200,
            body: Vec::new(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone)]
struct MockState {
    /// Path and query of every request received, in arrival order.
    requests: Arc<Mutex<Vec<String>>>,
    /// Scripted responses per path and query.
    routes: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
}

/// Mock backend server for testing.
pub struct MockBackend {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockBackend {
    /// Start a new mock backend server.
    pub async fn start() -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            routes: Arc::new(Mutex::new(HashMap::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .fallback(handle_request)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Queue a response for the next request to `path_and_query`.
    ///
    /// Unscripted requests get a 404.
    pub async fn enqueue(&self, path_and_query: &str, resp: MockResponse) {
        self.state
            .routes
            .lock()
            .await
            .entry(path_and_query.to_string())
            .or_default()
            .push_back(resp);
    }

    /// Path and query of all captured requests.
    pub async fn captured_requests(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }

    /// Number of captured requests to `path_and_query`.
    pub async fn hits(&self, path_and_query: &str) -> usize {
        self.state
            .requests
            .lock()
            .await
            .iter()
            .filter(|p| p.as_str() == path_and_query)
            .count()
    }

    /// Get the base URL for this mock server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url(), path_and_query)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    state.requests.lock().await.push(path_and_query.clone());

    let mock_resp = state
        .routes
        .lock()
        .await
        .get_mut(&path_and_query)
        .and_then(|queue| queue.pop_front())
        .unwrap_or_else(|| MockResponse::status(404));

    if mock_resp.delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(mock_resp.delay_ms)).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(mock_resp.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(mock_resp.body))
        .unwrap()
}
