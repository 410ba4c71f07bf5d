use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tryon_core::{ErrorBody, FailureKind};

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Every way a try-on generation can fail
///
/// Each variant maps onto one [`FailureKind`] and one HTTP status.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No usable credential is configured
    #[error("API_KEY is not configured on the server")]
    MissingCredential,

    /// An image is absent or malformed, or the body could not be parsed
    #[error("{0}")]
    InvalidInput(String),

    /// The request body was not JSON
    #[error("Unsupported Content-Type, expected: 'Content-Type: application/json'")]
    UnsupportedContentType,

    /// The images exceed the accepted payload size
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The model answered with text instead of an image
    #[error("{0}")]
    UpstreamRefusal(String),

    /// The model produced no usable output
    #[error("{0}")]
    UpstreamEmpty(String),

    /// The upstream quota is exhausted
    #[error("Upstream rate limit exceeded: {0}")]
    RateLimited(String),

    /// The upstream rejected the credential
    #[error("Upstream rejected the credential: {0}")]
    Forbidden(String),

    /// Network failure or undecodable upstream response
    #[error("{0}")]
    Transport(String),

    /// The HTTP method is not served on the try-on path
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl GatewayError {
    /// Failure category reported to callers
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MissingCredential => FailureKind::MissingCredential,
            Self::InvalidInput(_) | Self::UnsupportedContentType => FailureKind::InvalidInput,
            Self::PayloadTooLarge(_) => FailureKind::PayloadTooLarge,
            Self::UpstreamRefusal(_) => FailureKind::UpstreamRefusal,
            Self::UpstreamEmpty(_) => FailureKind::UpstreamEmpty,
            Self::RateLimited(_) => FailureKind::RateLimited,
            Self::Forbidden(_) => FailureKind::Forbidden,
            Self::Transport(_) => FailureKind::Transport,
            Self::MethodNotAllowed => FailureKind::UnknownServer,
        }
    }

    /// HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => self.kind().status_code(),
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        self.kind()
            .standard_message()
            .map_or_else(|| self.to_string(), ToOwned::to_owned)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::warn!(kind = %self.kind(), error = %self, "try-on request failed");
        } else {
            tracing::debug!(kind = %self.kind(), error = %self, "try-on request rejected");
        }

        let body = ErrorBody {
            error: self.client_message(),
            kind: Some(self.kind()),
        };

        (status, Json(body)).into_response()
    }
}
