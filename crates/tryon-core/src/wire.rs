//! JSON bodies exchanged between clients and the gateway endpoint

use serde::{Deserialize, Serialize};

use crate::{asset::ImageAsset, category::Category, failure::FailureKind};

/// Body of `POST <gateway path>`
///
/// Both images are optional here so that an absent image is reported as
/// invalid input by the gateway rather than as a JSON parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnPayload {
    /// Photo of the person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_image: Option<ImageAsset>,
    /// Photo of the garment or item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_image: Option<ImageAsset>,
    /// Garment class, `clothes` when omitted
    #[serde(default)]
    pub category: Category,
}

/// Successful generation: `{"result": "data:image/png;base64,..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnResponse {
    /// Data URL of the generated image
    pub result: String,
}

/// Failed generation: `{"error": "...", "kind": "upstream_refusal"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Failure category, absent in bodies produced by other proxies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
}

/// Body of `GET <gateway path>`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatus {
    /// Always `online` when the gateway answers
    pub status: String,
    /// Upstream model identifier
    pub model: String,
    /// Whether a credential is configured
    pub credential_configured: bool,
}
