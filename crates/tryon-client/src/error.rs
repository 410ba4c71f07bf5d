use tryon_core::{FailureKind, MissingImage};
use tryon_gateway::GatewayError;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, TryOnClientError>;

/// Errors from the try-on client
#[derive(Debug, thiserror::Error)]
pub enum TryOnClientError {
    /// A required image was not supplied
    #[error(transparent)]
    MissingImage(#[from] MissingImage),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with an error
    #[error("{message}")]
    Gateway {
        /// HTTP status code, if the failure crossed HTTP
        status: Option<u16>,
        /// Failure category
        kind: FailureKind,
        /// Message for the end user
        message: String,
    },

    /// Failed to parse response
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The gateway returned something other than an image data URL
    #[error("gateway returned a malformed image: {0}")]
    InvalidResult(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TryOnClientError {
    /// Build a gateway error, substituting the standard message for kinds
    /// whose raw text is not actionable
    pub(crate) fn gateway(status: Option<u16>, kind: FailureKind, message: String) -> Self {
        let message = kind.standard_message().map_or(message, ToOwned::to_owned);
        Self::Gateway { status, kind, message }
    }

    /// Failure category of this error
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MissingImage(_) => FailureKind::InvalidInput,
            Self::Http(_) | Self::Parse(_) | Self::InvalidResult(_) => FailureKind::Transport,
            Self::Gateway { kind, .. } => *kind,
            Self::Config(_) => FailureKind::UnknownServer,
        }
    }
}

impl From<GatewayError> for TryOnClientError {
    fn from(err: GatewayError) -> Self {
        Self::gateway(Some(err.status_code().as_u16()), err.kind(), err.client_message())
    }
}
