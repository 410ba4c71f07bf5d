use std::{sync::Arc, time::Instant};

use opentelemetry::metrics::Histogram;
use tryon_config::GatewayConfig;
use tryon_core::{
    ImageAsset, ImageSlot, MissingImage, format_data_url, normalize_image_media_type, validate_base64,
};
use tryon_telemetry::metrics;

use crate::{
    classify::{Classification, classify_response, empty_message},
    error::{GatewayError, Result},
    model::ImageModel,
    protocol::{GoogleContent, GoogleGenerationConfig, GoogleInlineData, GooglePart, GoogleRequest},
};

/// Media type assumed when the model omits one
const DEFAULT_OUTPUT_MEDIA_TYPE: &str = "image/png";

/// An image produced by the model
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    media_type: String,
    encoded_data: String,
}

impl GeneratedImage {
    fn from_inline(inline: GoogleInlineData) -> Result<Self> {
        validate_base64(&inline.data)
            .map_err(|e| GatewayError::Transport(format!("The image model returned unusable image data: {e}")))?;

        let media_type = match inline.mime_type.as_deref().map(str::trim) {
            Some(mime) if !mime.is_empty() => normalize_image_media_type(mime)
                .map_err(|e| GatewayError::Transport(format!("The image model returned an unusable result: {e}")))?,
            _ => DEFAULT_OUTPUT_MEDIA_TYPE.to_owned(),
        };

        Ok(Self {
            media_type,
            encoded_data: inline.data,
        })
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn encoded_data(&self) -> &str {
        &self.encoded_data
    }

    /// `data:<media type>;base64,<data>`
    pub fn to_data_url(&self) -> String {
        format_data_url(&self.media_type, &self.encoded_data)
    }
}

impl std::fmt::Debug for GeneratedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedImage")
            .field("media_type", &self.media_type)
            .field("encoded_len", &self.encoded_data.len())
            .finish()
    }
}

impl From<MissingImage> for GatewayError {
    fn from(err: MissingImage) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Credential-holding gateway to the upstream image model
///
/// Stateless apart from its immutable configuration: every call to
/// [`Gateway::generate`] makes at most one upstream request and never retries.
pub struct Gateway {
    config: GatewayConfig,
    model: Arc<dyn ImageModel>,
    duration: Histogram<f64>,
}

impl Gateway {
    pub fn new(config: GatewayConfig, model: Arc<dyn ImageModel>) -> Self {
        let duration = opentelemetry::global::meter("tryon-gateway")
            .f64_histogram(metrics::GENERATION_DURATION)
            .with_unit("s")
            .with_description("Duration of try-on generations, upstream call included")
            .build();

        Self {
            config,
            model,
            duration,
        }
    }

    /// Upstream model identifier
    pub fn model_name(&self) -> &str {
        &self.config.model
    }

    /// Whether a non-blank credential is configured
    pub fn credential_configured(&self) -> bool {
        self.config.credential().is_some()
    }

    /// Limit applied to inbound request bodies
    pub const fn body_limit(&self) -> usize {
        self.config.body_limit_bytes()
    }

    /// Synthesize an image of the subject wearing the item
    ///
    /// Validation runs first, then the credential check, so neither a bad
    /// request nor a missing credential ever reaches the upstream.
    pub async fn generate(
        &self,
        subject: Option<&ImageAsset>,
        item: Option<&ImageAsset>,
        instruction: &str,
    ) -> Result<GeneratedImage> {
        let start = Instant::now();
        tracing::debug!(state = "received", model = %self.config.model, "try-on generation");

        let result = self.run(subject, item, instruction).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(err) => err.kind().as_str(),
        };
        metrics::record_generation(&self.duration, start, outcome);
        tracing::debug!(state = "responded", outcome, "try-on generation");

        result
    }

    async fn run(
        &self,
        subject: Option<&ImageAsset>,
        item: Option<&ImageAsset>,
        instruction: &str,
    ) -> Result<GeneratedImage> {
        let subject = subject.ok_or(MissingImage(ImageSlot::Subject))?;
        let item = item.ok_or(MissingImage(ImageSlot::Item))?;
        self.check_payload_size(subject, item)?;
        tracing::debug!(state = "validated", "try-on generation");

        let api_key = self.config.credential().ok_or(GatewayError::MissingCredential)?;

        let request = build_request(subject, item, instruction);
        tracing::debug!(state = "forwarded", model = %self.model.name(), "try-on generation");

        let response = self
            .model
            .generate_content(&request, api_key)
            .await
            .inspect_err(|err| tracing::debug!(state = "error", kind = %err.kind(), "try-on generation"))?;

        let classification = classify_response(response);
        tracing::debug!(state = classification.label(), "try-on generation");

        match classification {
            Classification::Image(inline) => GeneratedImage::from_inline(inline),
            Classification::Refusal(text) => Err(GatewayError::UpstreamRefusal(text)),
            Classification::Empty(reason) => Err(GatewayError::UpstreamEmpty(empty_message(reason.as_deref()))),
        }
    }

    fn check_payload_size(&self, subject: &ImageAsset, item: &ImageAsset) -> Result<()> {
        let total = subject.encoded_len().saturating_add(item.encoded_len());
        let limit = self.config.max_payload_bytes;

        if total > limit {
            return Err(GatewayError::PayloadTooLarge(format!(
                "Combined image size of {total} bytes exceeds the {limit} byte limit. Use smaller or compressed photos."
            )));
        }

        Ok(())
    }
}

/// Parts are ordered subject, item, instruction
fn build_request(subject: &ImageAsset, item: &ImageAsset, instruction: &str) -> GoogleRequest {
    GoogleRequest {
        contents: vec![GoogleContent {
            role: Some("user".to_owned()),
            parts: vec![
                GooglePart::inline_data(subject.media_type(), subject.encoded_data()),
                GooglePart::inline_data(item.media_type(), item.encoded_data()),
                GooglePart::text(instruction),
            ],
        }],
        generation_config: Some(GoogleGenerationConfig {
            response_modalities: vec!["IMAGE".to_owned(), "TEXT".to_owned()],
            candidate_count: None,
        }),
    }
}
