use crate::asset::AssetError;

/// Format a media type and base64 payload as `data:<type>;base64,<data>`
pub fn format_data_url(media_type: &str, encoded_data: &str) -> String {
    format!("data:{media_type};base64,{encoded_data}")
}

/// Borrowed view of a base64 data URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    media_type: &'a str,
    encoded_data: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Parse a `data:<type>;base64,<data>` string
    ///
    /// Only base64 data URLs with a non-empty media type and a payload drawn
    /// from the standard base64 alphabet are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::MalformedDataUrl`] for anything else
    pub fn parse(input: &'a str) -> Result<Self, AssetError> {
        let rest = input.strip_prefix("data:").ok_or(AssetError::MalformedDataUrl)?;
        let (header, encoded_data) = rest.split_once(',').ok_or(AssetError::MalformedDataUrl)?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or(AssetError::MalformedDataUrl)?;

        if media_type.is_empty() || media_type.contains(';') {
            return Err(AssetError::MalformedDataUrl);
        }

        if encoded_data.is_empty() || !encoded_data.bytes().all(is_base64_byte) {
            return Err(AssetError::MalformedDataUrl);
        }

        Ok(Self {
            media_type,
            encoded_data,
        })
    }

    /// Media type from the URL header
    pub const fn media_type(&self) -> &'a str {
        self.media_type
    }

    /// Base64 payload after the comma
    pub const fn encoded_data(&self) -> &'a str {
        self.encoded_data
    }
}

const fn is_base64_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'/' | b'=')
}
