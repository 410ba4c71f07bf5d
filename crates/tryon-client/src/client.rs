use std::{fmt, sync::Arc};

use reqwest::StatusCode;
use tryon_core::{DataUrl, ErrorBody, FailureKind, InstructionSet, TryOnRequest, TryOnResponse, validate_base64};
use tryon_gateway::{Gateway, GatewayError};
use url::Url;

use crate::error::{Result, TryOnClientError};

/// Path the gateway endpoint is mounted at unless configured otherwise
pub const DEFAULT_PATH: &str = "/api/tryon";

/// Backend mode for the try-on client
#[derive(Clone)]
enum Backend {
    /// HTTP client talking to a remote gateway
    Remote {
        base_url: Url,
        path: String,
        http: reqwest::Client,
    },
    /// Gateway running in the same process
    Direct {
        gateway: Arc<Gateway>,
        instructions: Arc<InstructionSet>,
    },
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { base_url, path, .. } => f
                .debug_struct("Remote")
                .field("base_url", base_url)
                .field("path", path)
                .finish_non_exhaustive(),
            Self::Direct { gateway, .. } => f
                .debug_struct("Direct")
                .field("model", &gateway.model_name())
                .finish_non_exhaustive(),
        }
    }
}

/// Composes try-on requests and submits them to a gateway
///
/// Stateless: every [`TryOnClient::submit`] is one independent attempt with
/// no caching and no retry.
#[derive(Debug, Clone)]
pub struct TryOnClient {
    backend: Backend,
}

impl TryOnClient {
    /// Create a client for a gateway served at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or not HTTP(S)
    pub fn remote(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| TryOnClientError::Config(format!("invalid base URL: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TryOnClientError::Config(format!(
                "unsupported base URL scheme '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            backend: Backend::Remote {
                base_url,
                path: DEFAULT_PATH.to_owned(),
                http: reqwest::Client::new(),
            },
        })
    }

    /// Create a client that calls an in-process gateway
    pub fn direct(gateway: Arc<Gateway>, instructions: InstructionSet) -> Self {
        Self {
            backend: Backend::Direct {
                gateway,
                instructions: Arc::new(instructions),
            },
        }
    }

    /// Set the endpoint path (remote mode only)
    #[must_use]
    pub fn with_path(mut self, endpoint_path: &str) -> Self {
        if let Backend::Remote { path, .. } = &mut self.backend {
            endpoint_path.clone_into(path);
        }

        self
    }

    /// Submit a try-on request and return the generated image as a data URL
    ///
    /// # Errors
    ///
    /// Returns an error carrying a [`FailureKind`] if the gateway is unusable,
    /// generation fails, or the result is not a valid image data URL
    pub async fn submit(&self, request: &TryOnRequest) -> Result<String> {
        tracing::debug!(category = %request.category(), "submitting try-on request");

        let result = match &self.backend {
            Backend::Remote { base_url, path, http } => {
                let url = make_url(base_url, path);

                let response = http.post(url).json(&request.to_payload()).send().await?;

                let body: TryOnResponse = handle_error(response)
                    .await?
                    .json()
                    .await
                    .map_err(|e| TryOnClientError::Parse(e.to_string()))?;

                body.result
            }
            Backend::Direct { gateway, instructions } => {
                if !gateway.credential_configured() {
                    return Err(GatewayError::MissingCredential.into());
                }

                let instruction = instructions.render(request.category());

                gateway
                    .generate(Some(request.subject()), Some(request.item()), &instruction)
                    .await?
                    .to_data_url()
            }
        };

        check_result(&result)?;

        Ok(result)
    }
}

// -- Helper functions --

/// Build a URL from a base and path
fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

/// Check an HTTP response for errors
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (kind, message) = parse_error_body(status, &body);

    tracing::debug!(%status, %kind, "gateway returned error");

    Err(TryOnClientError::gateway(Some(status.as_u16()), kind, message))
}

/// Parse an error response body into (kind, message)
///
/// Bodies without a `kind` field, or that are not JSON at all, fall back to
/// the HTTP status.
fn parse_error_body(status: StatusCode, body: &str) -> (FailureKind, String) {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error, kind }) => (kind.unwrap_or_else(|| FailureKind::from_status(status)), error),
        Err(_) if body.trim().is_empty() => (FailureKind::from_status(status), status.to_string()),
        Err(_) => (FailureKind::from_status(status), body.trim().to_owned()),
    }
}

/// A result must be a base64 image data URL
fn check_result(result: &str) -> Result<()> {
    let url = DataUrl::parse(result).map_err(|e| TryOnClientError::InvalidResult(e.to_string()))?;

    if !url.media_type().starts_with("image/") {
        return Err(TryOnClientError::InvalidResult(format!(
            "unexpected media type '{}'",
            url.media_type()
        )));
    }

    validate_base64(url.encoded_data()).map_err(|e| TryOnClientError::InvalidResult(e.to_string()))
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use tryon_config::GatewayConfig;
    use tryon_core::{Category, ImageAsset};
    use tryon_gateway::GoogleImageModel;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, body_string_contains, header, method, path},
    };

    use super::*;

    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn request(category: Category) -> TryOnRequest {
        let asset = ImageAsset::new(PIXEL, "image/png").unwrap();
        TryOnRequest::new(asset.clone(), asset, category)
    }

    async fn gateway_replying(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tryon"))
            .respond_with(template)
            .mount(&server)
            .await;

        server
    }

    #[tokio::test]
    async fn remote_posts_payload_and_returns_data_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tryon"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "modelImage": {"base64": PIXEL, "mimeType": "image/png"},
                "itemImage": {"base64": PIXEL, "mimeType": "image/png"},
                "category": "full-outfit"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"result": format!("data:image/png;base64,{PIXEL}")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TryOnClient::remote(&server.uri()).unwrap();
        let url = client.submit(&request(Category::FullOutfit)).await.unwrap();

        assert_eq!(url, format!("data:image/png;base64,{PIXEL}"));
    }

    #[tokio::test]
    async fn remote_honours_custom_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/tryon"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"result": format!("data:image/png;base64,{PIXEL}")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TryOnClient::remote(&server.uri()).unwrap().with_path("/v1/tryon");

        assert!(client.submit(&request(Category::Clothes)).await.is_ok());
    }

    #[tokio::test]
    async fn refusal_message_is_verbatim() {
        let server = gateway_replying(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "I cannot process this image", "kind": "upstream_refusal"})),
        )
        .await;

        let err = TryOnClient::remote(&server.uri())
            .unwrap()
            .submit(&request(Category::Shoes))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::UpstreamRefusal);
        assert_eq!(err.to_string(), "I cannot process this image");
    }

    #[tokio::test]
    async fn rate_limit_gets_standard_message() {
        let server = gateway_replying(
            ResponseTemplate::new(429).set_body_json(json!({"error": "quota exceeded", "kind": "rate_limited"})),
        )
        .await;

        let err = TryOnClient::remote(&server.uri())
            .unwrap()
            .submit(&request(Category::Pants))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::RateLimited);
        assert_eq!(err.to_string(), FailureKind::RateLimited.standard_message().unwrap());
    }

    #[tokio::test]
    async fn kind_falls_back_to_status() {
        let server = gateway_replying(ResponseTemplate::new(403).set_body_json(json!({"error": "nope"}))).await;

        let err = TryOnClient::remote(&server.uri())
            .unwrap()
            .submit(&request(Category::Pants))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Forbidden);
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept() {
        let server = gateway_replying(ResponseTemplate::new(502).set_body_string("Bad Gateway")).await;

        let err = TryOnClient::remote(&server.uri())
            .unwrap()
            .submit(&request(Category::Pants))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Transport);
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[tokio::test]
    async fn malformed_result_is_transport() {
        let server =
            gateway_replying(ResponseTemplate::new(200).set_body_json(json!({"result": "https://example.com/a.png"})))
                .await;

        let err = TryOnClient::remote(&server.uri())
            .unwrap()
            .submit(&request(Category::Clothes))
            .await
            .unwrap_err();

        assert!(matches!(err, TryOnClientError::InvalidResult(_)));
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn unreachable_gateway_is_transport() {
        let err = TryOnClient::remote("http://127.0.0.1:9")
            .unwrap()
            .submit(&request(Category::Clothes))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(matches!(
            TryOnClient::remote("ftp://example.com"),
            Err(TryOnClientError::Config(_))
        ));
        assert!(TryOnClient::remote("not a url").is_err());
    }

    fn direct_client(upstream: &MockServer, api_key: Option<&str>) -> TryOnClient {
        let config = GatewayConfig {
            api_key: api_key.map(|key| SecretString::from(key.to_owned())),
            base_url: Url::parse(&format!("{}/v1beta", upstream.uri())).unwrap(),
            ..GatewayConfig::default()
        };
        let model = GoogleImageModel::new(&config).unwrap();
        let gateway = Arc::new(Gateway::new(config, Arc::new(model)));

        TryOnClient::direct(gateway, InstructionSet::default())
    }

    #[tokio::test]
    async fn direct_renders_instruction_and_returns_data_url() {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash-image:generateContent"))
            .and(body_string_contains("Input 2: Image of a swimsuit."))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": PIXEL}}]}}]
            })))
            .expect(1)
            .mount(&upstream)
            .await;

        let url = direct_client(&upstream, Some("test-key"))
            .submit(&request(Category::Swimwear))
            .await
            .unwrap();

        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn direct_without_credential_makes_no_call() {
        let upstream = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&upstream)
            .await;

        let err = direct_client(&upstream, None)
            .submit(&request(Category::Clothes))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::MissingCredential);
        assert_eq!(err.to_string(), FailureKind::MissingCredential.standard_message().unwrap());
    }

    #[test]
    fn parse_error_body_variants() {
        let (kind, message) = parse_error_body(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Missing image data", "kind": "invalid_input"}"#,
        );
        assert_eq!(kind, FailureKind::InvalidInput);
        assert_eq!(message, "Missing image data");

        let (kind, message) = parse_error_body(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(kind, FailureKind::UnknownServer);
        assert_eq!(message, "500 Internal Server Error");
    }
}
