use crate::protocol::{GoogleInlineData, GoogleResponse};

/// Message used when the model produced neither an image nor any text
pub const EMPTY_OUTPUT_MESSAGE: &str =
    "AI failed to generate a resulting image. The images might be too complex or inappropriate.";

/// What an upstream reply amounts to
#[derive(Debug, Clone)]
pub enum Classification {
    /// The first inline image found in the reply
    Image(GoogleInlineData),
    /// Text the model returned in place of an image
    Refusal(String),
    /// Nothing usable, with the upstream's stated reason if any
    Empty(Option<String>),
}

impl Classification {
    /// Short label used in logs and metrics
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Image(_) => "image-found",
            Self::Refusal(_) => "refusal-found",
            Self::Empty(_) => "empty",
        }
    }
}

/// Classify a `generateContent` reply
///
/// Candidates are scanned in order and the first inline-data part wins. If no
/// part carries an image, the non-blank answer text of all candidates becomes
/// a refusal. Reasoning parts are never treated as an answer.
pub fn classify_response(response: GoogleResponse) -> Classification {
    let mut texts = Vec::new();
    let mut finish_reason = None;

    for candidate in response.candidates {
        if finish_reason.is_none() {
            finish_reason = candidate.finish_reason.filter(|reason| reason != "STOP");
        }

        for part in candidate.content.into_iter().flat_map(|content| content.parts) {
            if let Some(inline) = part.inline_data {
                return Classification::Image(inline);
            }

            if part.thought.unwrap_or(false) {
                continue;
            }

            if let Some(text) = part.text.filter(|text| !text.trim().is_empty()) {
                texts.push(text);
            }
        }
    }

    if !texts.is_empty() {
        return Classification::Refusal(texts.join("\n"));
    }

    let block_reason = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
        .map(|reason| format!("prompt blocked: {reason}"));

    Classification::Empty(block_reason.or_else(|| finish_reason.map(|reason| format!("finish reason: {reason}"))))
}

/// Caller-facing message for an empty reply
pub fn empty_message(reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("{EMPTY_OUTPUT_MESSAGE} ({reason})"),
        None => EMPTY_OUTPUT_MESSAGE.to_owned(),
    }
}
