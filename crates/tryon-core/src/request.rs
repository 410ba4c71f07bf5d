use std::fmt;

use crate::{asset::ImageAsset, category::Category, wire::TryOnPayload};

/// Which of the two image inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    /// The person being dressed
    Subject,
    /// The garment or item
    Item,
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Subject => "model",
            Self::Item => "item",
        })
    }
}

/// A required image was not supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Missing image data: the {0} image is required")]
pub struct MissingImage(pub ImageSlot);

/// A complete try-on request: both images and a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnRequest {
    subject: ImageAsset,
    item: ImageAsset,
    category: Category,
}

impl TryOnRequest {
    pub const fn new(subject: ImageAsset, item: ImageAsset, category: Category) -> Self {
        Self {
            subject,
            item,
            category,
        }
    }

    /// Build a request from possibly-empty input slots
    ///
    /// # Errors
    ///
    /// Returns [`MissingImage`] naming the first empty slot
    pub fn from_slots(
        subject: Option<ImageAsset>,
        item: Option<ImageAsset>,
        category: Category,
    ) -> Result<Self, MissingImage> {
        let subject = subject.ok_or(MissingImage(ImageSlot::Subject))?;
        let item = item.ok_or(MissingImage(ImageSlot::Item))?;
        Ok(Self::new(subject, item, category))
    }

    pub const fn subject(&self) -> &ImageAsset {
        &self.subject
    }

    pub const fn item(&self) -> &ImageAsset {
        &self.item
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    /// Wire body for the gateway endpoint
    pub fn to_payload(&self) -> TryOnPayload {
        TryOnPayload {
            model_image: Some(self.subject.clone()),
            item_image: Some(self.item.clone()),
            category: self.category,
        }
    }
}
