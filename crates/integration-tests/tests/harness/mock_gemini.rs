//! Mock Gemini backend for integration tests
//!
//! Serves `POST /v1beta/models/{model}:generateContent` with a canned reply

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// One candidate carrying an inline PNG
    Image,
    /// One candidate carrying only text
    Text(String),
    /// A blocked prompt with no candidates
    Blocked(String),
    /// An error status with a Google-style error body
    Status(u16, String),
}

/// Mock Gemini backend with call accounting
pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

struct MockGeminiState {
    reply: Reply,
    request_count: AtomicU32,
    last_api_key: Mutex<Option<String>>,
    last_model: Mutex<Option<String>>,
    last_body: Mutex<Option<Value>>,
}

impl MockGemini {
    /// Start a mock that returns an image
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Reply::Image).await
    }

    /// Start a mock with the given reply
    pub async fn start_with(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            reply,
            request_count: AtomicU32::new(0),
            last_api_key: Mutex::new(None),
            last_model: Mutex::new(None),
            last_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1beta/models/{model_action}", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the gateway, including `/v1beta`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// Number of generation requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// API key header of the most recent request
    pub fn last_api_key(&self) -> Option<String> {
        self.state.last_api_key.lock().unwrap().clone()
    }

    /// Model named in the most recent request path
    pub fn last_model(&self) -> Option<String> {
        self.state.last_model.lock().unwrap().clone()
    }

    /// JSON body of the most recent request
    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(
    State(state): State<Arc<MockGeminiState>>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let Some(model) = model_action.strip_suffix(":generateContent") else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": {"code": 404, "message": "unknown action"}})));
    };

    *state.last_model.lock().unwrap() = Some(model.to_owned());
    *state.last_api_key.lock().unwrap() = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    *state.last_body.lock().unwrap() = Some(body);

    match &state.reply {
        Reply::Image => (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [
                            {"text": "Here is the result."},
                            {"inlineData": {"mimeType": "image/png", "data": super::PIXEL}}
                        ]
                    },
                    "finishReason": "STOP"
                }]
            })),
        ),
        Reply::Text(text) => (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": text}]},
                    "finishReason": "STOP"
                }]
            })),
        ),
        Reply::Blocked(reason) => (
            StatusCode::OK,
            Json(json!({"promptFeedback": {"blockReason": reason}})),
        ),
        Reply::Status(code, message) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(json!({"error": {"code": code, "message": message, "status": "ERROR"}})),
            )
        }
    }
}
