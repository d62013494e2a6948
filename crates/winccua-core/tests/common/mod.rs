//! In-process mock of the WinCC Unified GraphQL endpoint.
//!
//! Responses are scripted in order; once the script runs out every request
//! gets `{"data": null}`. Every request is recorded for later inspection.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

impl RecordedRequest {
    pub fn query(&self) -> &str {
        self.body["query"].as_str().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct MockResponse {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<MockResponse>>,
}

pub struct MockBackend {
    pub url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Bind to a random port and serve `/graphql` in a background task.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/graphql", post(graphql))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Mock backend failed");
        });

        Self {
            url: format!("http://127.0.0.1:{}/graphql", port),
            state,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn respond_json(&self, body: Value) {
        self.push(StatusCode::OK, body.to_string(), None);
    }

    pub fn respond_json_after(&self, body: Value, delay: Duration) {
        self.push(StatusCode::OK, body.to_string(), Some(delay));
    }

    pub fn respond_status(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.push(status, body.to_string(), None);
    }

    fn push(&self, status: StatusCode, body: String, delay: Option<Duration>) {
        self.state
            .responses
            .lock()
            .unwrap()
            .push_back(MockResponse { status, body, delay });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn graphql(State(state): State<Arc<MockState>>, headers: HeaderMap, body: String) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { authorization, body });

    let next = state.responses.lock().unwrap().pop_front();
    let response = next.unwrap_or(MockResponse {
        status: StatusCode::OK,
        body: r#"{"data":null}"#.to_string(),
        delay: None,
    });

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}

/// A login payload as WinCC Unified returns it
pub fn login_response(token: &str) -> Value {
    serde_json::json!({
        "data": {
            "login": {
                "token": token,
                "expires": "2030-01-01T00:00:00Z",
                "user": {"id": "1", "name": "op", "fullName": "Operator", "language": "en-US"},
                "error": null
            }
        }
    })
}

/// URL of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/graphql", port)
}
