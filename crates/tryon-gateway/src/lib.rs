#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Image synthesis gateway
//!
//! Holds the upstream credential, validates try-on requests, forwards each
//! one to the Gemini image model exactly once, and classifies the reply into
//! an image or a typed failure.

mod classify;
mod error;
mod gateway;
mod model;
pub mod protocol;
mod request;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tryon_core::{GatewayStatus, InstructionSet, TryOnPayload, TryOnResponse};

pub use classify::{Classification, classify_response};
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GeneratedImage};
pub use model::{GoogleImageModel, ImageModel};

use request::ExtractPayload;

/// Shared state of the try-on endpoint
#[derive(Clone)]
pub struct TryOnState {
    gateway: Arc<Gateway>,
    instructions: Arc<InstructionSet>,
}

impl TryOnState {
    pub fn new(gateway: Arc<Gateway>, instructions: InstructionSet) -> Self {
        Self {
            gateway,
            instructions: Arc::new(instructions),
        }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }
}

/// Build the gateway from configuration
///
/// A missing credential is not an error here; requests fail with a
/// missing-credential error until one is configured.
///
/// # Errors
///
/// Returns an error if the upstream HTTP client fails to initialize
pub fn build_gateway(config: &tryon_config::Config) -> anyhow::Result<Arc<Gateway>> {
    let model = GoogleImageModel::new(&config.gateway)
        .map_err(|e| anyhow::anyhow!("Failed to initialize image synthesis gateway: {e}"))?;

    if config.gateway.credential().is_none() {
        tracing::warn!("gateway.api_key is not set, try-on requests will fail until it is configured");
    }

    tracing::debug!(model = %config.gateway.model, "image synthesis gateway initialized");

    Ok(Arc::new(Gateway::new(config.gateway.clone(), Arc::new(model))))
}

/// Create the endpoint router for try-on generation
pub fn endpoint_router(path: &str) -> Router<TryOnState> {
    Router::new().route(
        path,
        post(try_on)
            .get(status)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

/// Handle try-on generation requests
async fn try_on(
    State(state): State<TryOnState>,
    ExtractPayload(payload): ExtractPayload<TryOnPayload>,
) -> Result<Json<TryOnResponse>> {
    tracing::debug!(category = %payload.category, "try-on handler called");

    let instruction = state.instructions.render(payload.category);

    let image = state
        .gateway
        .generate(payload.model_image.as_ref(), payload.item_image.as_ref(), &instruction)
        .await?;

    Ok(Json(TryOnResponse {
        result: image.to_data_url(),
    }))
}

/// Report liveness and configuration without generating anything
async fn status(State(state): State<TryOnState>) -> Json<GatewayStatus> {
    Json(GatewayStatus {
        status: "online".to_owned(),
        model: state.gateway.model_name().to_owned(),
        credential_configured: state.gateway.credential_configured(),
    })
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> impl IntoResponse {
    ([(header::ALLOW, "GET, POST, OPTIONS")], GatewayError::MethodNotAllowed)
}
