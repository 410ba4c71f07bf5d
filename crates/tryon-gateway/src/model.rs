use std::time::Duration;

use async_trait::async_trait;
use axum::http::{self, StatusCode};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tryon_config::GatewayConfig;

use crate::{
    error::{GatewayError, Result},
    protocol::{GoogleErrorDetail, GoogleErrorResponse, GoogleRequest, GoogleResponse},
};

/// Header carrying the Google API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest slice of an unparseable upstream error body kept in messages
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Upstream image model seam
///
/// The gateway talks to the model only through this trait, so tests can
/// substitute a fake.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Send one `generateContent` request
    async fn generate_content(&self, request: &GoogleRequest, api_key: &SecretString) -> Result<GoogleResponse>;

    /// Model identifier
    fn name(&self) -> &str;
}

/// Gemini image model reached over the Generative Language REST API
pub struct GoogleImageModel {
    client: Client,
    endpoint: String,
    model: String,
}

impl GoogleImageModel {
    /// Create from gateway configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let base = config.base_url.as_str().trim_end_matches('/');

        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            endpoint: format!("{base}/models/{}:generateContent", config.model),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ImageModel for GoogleImageModel {
    async fn generate_content(&self, request: &GoogleRequest, api_key: &SecretString) -> Result<GoogleResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %self.model, error = %e, "upstream request failed");
                GatewayError::Transport(format!("Failed to reach the image model: {e}"))
            })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(format!("Failed to read the image model response: {e}")))?;

        if !status.is_success() {
            tracing::warn!(model = %self.model, status = %status, "upstream returned error");
            return Err(upstream_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(model = %self.model, error = %e, "failed to parse upstream response");
            GatewayError::Transport(format!("Failed to parse the image model response: {e}"))
        })
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// HTTP client for upstream calls; a zero timeout means none
fn http_client(timeout_seconds: u64) -> anyhow::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    let mut builder = Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers);

    if timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_seconds));
    }

    builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build upstream HTTP client: {e}"))
}

/// Map a non-success upstream reply onto the failure taxonomy
pub(crate) fn upstream_error(status: StatusCode, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<GoogleErrorResponse>(body)
        .ok()
        .map(|envelope| envelope.error);

    let message = detail
        .as_ref()
        .map(|detail| detail.message.trim())
        .filter(|message| !message.is_empty())
        .map_or_else(|| truncate(body.trim()), ToOwned::to_owned);

    match status.as_u16() {
        429 => GatewayError::RateLimited(message),
        401 | 403 => GatewayError::Forbidden(message),
        400 if detail.as_ref().is_some_and(names_invalid_key) => GatewayError::Forbidden(message),
        400 => GatewayError::InvalidInput(format!("The image model rejected the request: {message}")),
        413 => GatewayError::PayloadTooLarge(format!("The image model rejected the payload size: {message}")),
        _ => GatewayError::Transport(format!("The image model returned {status}: {message}")),
    }
}

fn names_invalid_key(detail: &GoogleErrorDetail) -> bool {
    detail.has_reason("API_KEY_INVALID")
        || detail.status.as_deref() == Some("PERMISSION_DENIED")
        || detail.message.contains("API key not valid")
}

fn truncate(body: &str) -> String {
    if body.is_empty() {
        return "no error details".to_owned();
    }

    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
