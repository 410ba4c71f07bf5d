use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe, independent of the upstream model
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
