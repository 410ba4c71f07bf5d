use indexmap::IndexMap;
use serde::Deserialize;
use tryon_core::{Category, InstructionSet, InstructionStrategy};

/// Wording of the instruction sent alongside the two images
///
/// ```toml
/// [instructions]
/// strategy = "replace"
///
/// [instructions.overrides]
/// shoes = "Replace the footwear of the person with the {garment} from the second image."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstructionsConfig {
    /// Built-in template family
    #[serde(default)]
    pub strategy: InstructionStrategy,
    /// Per-category templates replacing the built-in one
    #[serde(default)]
    pub overrides: IndexMap<Category, String>,
}

impl InstructionsConfig {
    /// Build the category lookup table
    pub fn instruction_set(&self) -> InstructionSet {
        InstructionSet::new(self.strategy, &self.overrides)
    }
}
