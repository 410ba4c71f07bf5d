use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Garment class being tried on
///
/// Serialized in kebab-case (`"full-outfit"`). Every variant must be given
/// wording in [`Category::garment`] and [`Category::region`]; the matches are
/// exhaustive so a new category does not compile until it has both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Upper-body clothing
    #[default]
    Clothes,
    /// Trousers, skirts, shorts
    Pants,
    /// Footwear
    Shoes,
    /// Swimsuits and bikinis
    Swimwear,
    /// A complete outfit
    FullOutfit,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Self; 5] = [
        Self::Clothes,
        Self::Pants,
        Self::Shoes,
        Self::Swimwear,
        Self::FullOutfit,
    ];

    /// Wire name of the category
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clothes => "clothes",
            Self::Pants => "pants",
            Self::Shoes => "shoes",
            Self::Swimwear => "swimwear",
            Self::FullOutfit => "full-outfit",
        }
    }

    /// Noun phrase naming the item in the second image
    pub const fn garment(self) -> &'static str {
        match self {
            Self::Clothes => "clothing item",
            Self::Pants => "pair of pants",
            Self::Shoes => "pair of shoes",
            Self::Swimwear => "swimsuit",
            Self::FullOutfit => "full outfit",
        }
    }

    /// Body region of the person whose garment gets replaced
    pub const fn region(self) -> &'static str {
        match self {
            Self::Clothes => "upper body (shirt, top, or jacket)",
            Self::Pants => "lower body (trousers, skirt, or shorts)",
            Self::Shoes => "feet (existing footwear)",
            Self::Swimwear => "torso and hips (current swimwear or clothing)",
            Self::FullOutfit => "whole body from shoulders to feet",
        }
    }

    /// Position of the category in [`Category::ALL`]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Clothes => 0,
            Self::Pants => 1,
            Self::Shoes => 2,
            Self::Swimwear => 3,
            Self::FullOutfit => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}', expected one of: clothes, pants, shoes, swimwear, full-outfit")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
