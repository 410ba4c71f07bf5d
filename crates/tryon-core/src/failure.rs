use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Caller-visible failure categories of a try-on request
///
/// Shared by the gateway, which reports them, and clients, which recover them
/// from the `kind` field of an error body or from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The gateway holds no usable credential
    MissingCredential,
    /// An image is absent or malformed, or the request body is unusable
    InvalidInput,
    /// The images together exceed the accepted payload size
    PayloadTooLarge,
    /// The model answered with text instead of an image
    UpstreamRefusal,
    /// The model produced no usable output
    UpstreamEmpty,
    /// The upstream quota is exhausted
    RateLimited,
    /// The upstream rejected the credential
    Forbidden,
    /// Reaching or decoding the upstream failed
    Transport,
    /// Anything else
    UnknownServer,
}

impl FailureKind {
    /// Wire name carried in the `kind` field of error bodies
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::InvalidInput => "invalid_input",
            Self::PayloadTooLarge => "payload_too_large",
            Self::UpstreamRefusal => "upstream_refusal",
            Self::UpstreamEmpty => "upstream_empty",
            Self::RateLimited => "rate_limited",
            Self::Forbidden => "forbidden",
            Self::Transport => "transport_error",
            Self::UnknownServer => "unknown_server_error",
        }
    }

    /// HTTP status the gateway answers with
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MissingCredential
            | Self::UpstreamRefusal
            | Self::UpstreamEmpty
            | Self::Transport
            | Self::UnknownServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure is about the caller's input
    pub const fn is_invalid_input(self) -> bool {
        matches!(self, Self::InvalidInput | Self::PayloadTooLarge)
    }

    /// Fixed, actionable message for failures whose raw upstream text is not
    /// useful to an end user
    pub const fn standard_message(self) -> Option<&'static str> {
        match self {
            Self::MissingCredential => Some(
                "The image generation service is not configured: API_KEY is not set on the server.",
            ),
            Self::RateLimited => Some(
                "The image generation quota is exhausted. Wait a moment and try again, or check the plan and billing of the API key.",
            ),
            Self::Forbidden => Some(
                "The image generation service rejected the server's API key. Check that the key is valid and has access to the image model.",
            ),
            _ => None,
        }
    }

    /// Best-effort kind for an error response that carries no `kind` field
    pub const fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 | 415 | 422 => Self::InvalidInput,
            413 => Self::PayloadTooLarge,
            429 => Self::RateLimited,
            401 | 403 => Self::Forbidden,
            502..=504 => Self::Transport,
            _ => Self::UnknownServer,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
