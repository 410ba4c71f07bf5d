use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;

use crate::{
    error::{GatewayError, Result},
    model::ImageModel,
    protocol::{GoogleRequest, GoogleResponse},
};

/// 1x1 transparent PNG
pub const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub fn image_reply() -> serde_json::Value {
    json!({"candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/jpeg", "data": PIXEL}}]}}]})
}

/// Canned upstream that counts calls and keeps the last request
pub struct FakeModel {
    reply: std::result::Result<serde_json::Value, fn() -> GatewayError>,
    calls: AtomicUsize,
    pub last_request: Mutex<Option<GoogleRequest>>,
}

impl FakeModel {
    pub fn replying(value: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(value),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(error: fn() -> GatewayError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageModel for FakeModel {
    async fn generate_content(&self, request: &GoogleRequest, _api_key: &SecretString) -> Result<GoogleResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.reply {
            Ok(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
            Err(error) => Err(error()),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

