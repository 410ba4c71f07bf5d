use std::fmt;

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Deserialize, Serialize};

use crate::data_url::{DataUrl, format_data_url};

/// Standard alphabet, padded on encode, padding optional on decode
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Image media types the upstream model accepts as inline data
const SUPPORTED_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/heic",
    "image/heif",
];

/// Reasons an image payload cannot be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    /// The payload decodes to zero bytes
    #[error("image data is empty")]
    Empty,

    /// The payload is not standard base64
    #[error("image data is not valid base64: {0}")]
    Encoding(String),

    /// The media type is not an image type the model understands
    #[error("unsupported image type '{0}'")]
    UnsupportedMediaType(String),

    /// A data URL was expected but the string does not have that shape
    #[error("malformed data URL")]
    MalformedDataUrl,
}

/// An immutable, validated image payload
///
/// Holds the base64 text exactly as supplied along with a normalized media
/// type. On the wire it is `{"base64": "...", "mimeType": "image/png"}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawImageAsset")]
pub struct ImageAsset {
    #[serde(rename = "base64")]
    encoded_data: String,
    #[serde(rename = "mimeType")]
    media_type: String,
}

/// Unvalidated wire shape of an [`ImageAsset`]
#[derive(Deserialize)]
struct RawImageAsset {
    base64: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

impl TryFrom<RawImageAsset> for ImageAsset {
    type Error = AssetError;

    fn try_from(raw: RawImageAsset) -> Result<Self, Self::Error> {
        Self::new(raw.base64, &raw.mime_type)
    }
}

impl ImageAsset {
    /// Build an asset from base64 text and a media type
    ///
    /// # Errors
    ///
    /// Returns an error if the media type is not a supported image type, or
    /// if the text is not base64 or decodes to nothing
    pub fn new(encoded_data: impl Into<String>, media_type: &str) -> Result<Self, AssetError> {
        let media_type = normalize_image_media_type(media_type)?;
        let encoded_data = encoded_data.into();

        let decoded = ENGINE
            .decode(encoded_data.as_bytes())
            .map_err(|e| AssetError::Encoding(e.to_string()))?;

        if decoded.is_empty() {
            return Err(AssetError::Empty);
        }

        Ok(Self {
            encoded_data,
            media_type,
        })
    }

    /// Build an asset by encoding raw image bytes
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is empty or the media type is unsupported
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> Result<Self, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::Empty);
        }

        Ok(Self {
            encoded_data: ENGINE.encode(bytes),
            media_type: normalize_image_media_type(media_type)?,
        })
    }

    /// Build an asset from a `data:<type>;base64,<data>` URL, as produced by
    /// browser file readers
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or its payload is invalid
    pub fn from_data_url(url: &str) -> Result<Self, AssetError> {
        let parsed = DataUrl::parse(url)?;
        Self::new(parsed.encoded_data(), parsed.media_type())
    }

    /// Base64 text of the image
    pub fn encoded_data(&self) -> &str {
        &self.encoded_data
    }

    /// Normalized media type, e.g. `image/jpeg`
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Size of the encoded payload in bytes
    pub fn encoded_len(&self) -> usize {
        self.encoded_data.len()
    }

    /// Decode the payload back into raw bytes
    ///
    /// # Errors
    ///
    /// Never fails for an asset built through the public constructors
    pub fn decode(&self) -> Result<Vec<u8>, AssetError> {
        ENGINE
            .decode(self.encoded_data.as_bytes())
            .map_err(|e| AssetError::Encoding(e.to_string()))
    }

    /// Render the asset as a self-contained data URL
    pub fn to_data_url(&self) -> String {
        format_data_url(&self.media_type, &self.encoded_data)
    }
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("media_type", &self.media_type)
            .field("encoded_len", &self.encoded_data.len())
            .finish()
    }
}

/// Check that `encoded` is base64 that decodes to at least one byte
///
/// # Errors
///
/// Returns [`AssetError::Encoding`] or [`AssetError::Empty`]
pub fn validate_base64(encoded: &str) -> Result<(), AssetError> {
    let decoded = ENGINE
        .decode(encoded.as_bytes())
        .map_err(|e| AssetError::Encoding(e.to_string()))?;

    if decoded.is_empty() {
        return Err(AssetError::Empty);
    }

    Ok(())
}

/// Lowercase a media type, drop parameters, and map known aliases
///
/// # Errors
///
/// Returns [`AssetError::UnsupportedMediaType`] unless the result is an image
/// type the model accepts
pub fn normalize_image_media_type(media_type: &str) -> Result<String, AssetError> {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let essence = match essence.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_owned(),
        _ => essence,
    };

    if SUPPORTED_MEDIA_TYPES.contains(&essence.as_str()) {
        Ok(essence)
    } else {
        Err(AssetError::UnsupportedMediaType(media_type.to_owned()))
    }
}
