//! Recipe Types
//!
//! Canonical recipe shape shared by the normalizer, the fallback generator
//! and the request boundary.

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_DESCRIPTION: &str = "A delicious recipe";
pub(crate) const DEFAULT_COOK_TIME: &str = "30 minutes";
pub(crate) const DEFAULT_DIFFICULTY: &str = "Medium";
pub(crate) const DEFAULT_TIPS: &str = "Enjoy your cooking!";

/// A single generated recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cook_time: String,
    /// Easy, Medium or Hard by convention; not enforced
    pub difficulty: String,
    pub tips: String,
}

impl Recipe {
    /// Recipe with every field at its default, named after its position
    pub fn placeholder(index: usize) -> Self {
        Self {
            name: default_name(index),
            description: DEFAULT_DESCRIPTION.to_string(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            cook_time: DEFAULT_COOK_TIME.to_string(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            tips: DEFAULT_TIPS.to_string(),
        }
    }
}

pub(crate) fn default_name(index: usize) -> String {
    format!("Recipe {}", index + 1)
}

/// Input to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Trimmed, non-blank ingredients in the order the user gave them
    pub ingredients: Vec<String>,
    /// Free-form dietary preference; "none" means unconstrained
    pub dietary: String,
    /// One unconventional recipe instead of three conventional ones
    pub surprise: bool,
}

impl GenerationRequest {
    pub fn new(ingredients: Vec<String>, dietary: impl Into<String>, surprise: bool) -> Self {
        Self {
            ingredients,
            dietary: dietary.into(),
            surprise,
        }
    }
}

/// Where a set of recipes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    /// Parsed from the language model's reply
    Ai,
    /// Produced locally by the fallback generator
    Mock,
}

impl std::fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeSource::Ai => write!(f, "ai"),
            RecipeSource::Mock => write!(f, "mock"),
        }
    }
}

/// Orchestrator output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub recipes: Vec<Recipe>,
    pub source: RecipeSource,
}

impl GenerationResult {
    pub fn used_fallback(&self) -> bool {
        self.source == RecipeSource::Mock
    }
}
