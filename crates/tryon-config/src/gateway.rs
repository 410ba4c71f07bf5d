use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Extra room for JSON framing on top of the image payload limit
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Image synthesis gateway configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Upstream API key; blank or absent means generation fails with a
    /// missing-credential error while the server keeps running
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Upstream API base URL
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Upstream model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// HTTP path of the try-on endpoint
    #[serde(default = "default_path")]
    pub path: String,
    /// Upper bound on the combined base64 size of both images
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
    /// Upstream request timeout in seconds, `0` (the default) for none
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            path: default_path(),
            max_payload_bytes: default_max_payload_bytes(),
            timeout_seconds: 0,
        }
    }
}

impl GatewayConfig {
    /// The configured credential, if it is present and not blank
    pub fn credential(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }

    /// Limit applied to the raw HTTP request body
    pub const fn body_limit_bytes(&self) -> usize {
        self.max_payload_bytes.saturating_add(BODY_OVERHEAD_BYTES)
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

fn default_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_path() -> String {
    "/api/tryon".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_payload_bytes() -> usize {
    4_500_000
}
