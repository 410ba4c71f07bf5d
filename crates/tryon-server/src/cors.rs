use std::time::Duration;

use http::{Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tryon_config::{AllowedOrigins, CorsConfig};

/// Build a Tower CORS layer for the try-on endpoint
///
/// Browsers call the gateway with a JSON body, so preflights must allow
/// `POST` and the `Content-Type` header.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let layer = match &config.origins {
        AllowedOrigins::Any => layer.allow_origin(AllowOrigin::any()),
        AllowedOrigins::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    match config.max_age {
        Some(seconds) => layer.max_age(Duration::from_secs(seconds)),
        None => layer,
    }
}
