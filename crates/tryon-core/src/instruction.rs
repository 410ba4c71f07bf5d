//! Category to instruction text mapping
//!
//! Instructions are rendered from a per-category template table. Templates may
//! reference `{garment}` and `{region}`, which are filled from the category.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Gentle wording: extract the item and blend it onto the person
const BLEND_TEMPLATE: &str = "\
Task: Virtual AI Try-On.
Input 1: Image of a person (the model).
Input 2: Image of a {garment}.

Instructions:
1. Extract the {garment} from Input 2.
2. Seamlessly and realistically dress the person in Input 1 with it, covering the {region}.
3. Match the person's pose, lighting, perspective, and body shape.
4. Preserve the person's identity, face, skin tone, and the original background.
5. Output only the resulting image.";

/// Aggressive wording: erase the original garment before dressing
const REPLACE_TEMPLATE: &str = "\
Task: Virtual AI Try-On (garment replacement).
Input 1: Image of a person (the model).
Input 2: Image of a {garment}.

Instructions:
1. Completely remove what the person in Input 1 is wearing on the {region}. No trace of the original garment may remain.
2. Dress the person in the exact {garment} from Input 2, keeping its color, pattern, fabric, and cut.
3. Keep the person's identity, face, pose, and the background unchanged.
4. Output only the resulting image.";

/// Built-in template family used for categories without an override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionStrategy {
    /// Blend the item onto the person
    #[default]
    Blend,
    /// Erase the original garment, then dress the person
    Replace,
}

impl InstructionStrategy {
    const fn template(self) -> &'static str {
        match self {
            Self::Blend => BLEND_TEMPLATE,
            Self::Replace => REPLACE_TEMPLATE,
        }
    }
}

/// Lookup table from [`Category`] to instruction template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSet {
    templates: [String; Category::ALL.len()],
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self::new(InstructionStrategy::default(), &IndexMap::new())
    }
}

impl InstructionSet {
    /// Build a table from a strategy plus per-category template overrides
    pub fn new(strategy: InstructionStrategy, overrides: &IndexMap<Category, String>) -> Self {
        let templates = Category::ALL.map(|category| {
            overrides
                .get(&category)
                .cloned()
                .unwrap_or_else(|| strategy.template().to_owned())
        });

        Self { templates }
    }

    /// Template registered for `category`, before placeholder substitution
    pub fn template(&self, category: Category) -> &str {
        &self.templates[category.index()]
    }

    /// Instruction text sent to the model for `category`
    pub fn render(&self, category: Category) -> String {
        self.template(category)
            .replace("{garment}", category.garment())
            .replace("{region}", category.region())
    }
}
