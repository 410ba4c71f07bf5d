#![allow(dead_code)]

pub mod config;
pub mod mock_gemini;
pub mod server;

/// 1x1 transparent PNG
pub const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// 1x1 grey baseline JPEG
pub const JPEG: &str = "/9j/2wBDAAEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQH/wAALCAABAAEBAREA/8QAFAABAAAAAAAAAAAAAAAAAAAAAP/EABQQAQAAAAAAAAAAAAAAAAAAAAD/2gAIAQEAAD8AP//Z";

/// Assert the `data:<type>;base64,<data>` shape of a generated result
pub fn assert_image_data_url(result: &str) {
    let url = tryon_core::DataUrl::parse(result).unwrap_or_else(|e| panic!("{result:?} is not a data URL: {e}"));
    assert!(url.media_type().starts_with("image/"), "{result:?} is not an image");
    assert!(!url.media_type().contains(';'));
    assert!(
        url.encoded_data()
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
    );
}

/// Wire form of a valid image asset
pub fn image_json() -> serde_json::Value {
    serde_json::json!({"base64": PIXEL, "mimeType": "image/png"})
}
