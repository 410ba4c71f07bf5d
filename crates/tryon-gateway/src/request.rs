use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::{TryOnState, error::GatewayError};

/// Extractor for JSON request bodies, bounded by the gateway's body limit
pub struct ExtractPayload<T>(pub T);

impl<T: DeserializeOwned> axum::extract::FromRequest<TryOnState> for ExtractPayload<T> {
    type Rejection = GatewayError;

    async fn from_request(request: http::Request<Body>, state: &TryOnState) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json)
        {
            return Err(GatewayError::UnsupportedContentType);
        }

        let limit = state.gateway.body_limit();

        let bytes = axum::body::to_bytes(body, limit).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                GatewayError::PayloadTooLarge(format!("Request body is too large, limit is {limit} bytes"))
            } else {
                GatewayError::InvalidInput(format!("Failed to read request body: {err}"))
            }
        })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|e| GatewayError::InvalidInput(format!("Failed to parse request body: {e}")))
    }
}

/// `application/json`, with or without parameters such as a charset
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
