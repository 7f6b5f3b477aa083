use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Coarse ingredient class, used as the last resolution tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Protein,
    Grain,
    Vegetable,
    Dairy,
    Oil,
    Spice,
    #[default]
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 7] = [
        IngredientCategory::Protein,
        IngredientCategory::Grain,
        IngredientCategory::Vegetable,
        IngredientCategory::Dairy,
        IngredientCategory::Oil,
        IngredientCategory::Spice,
        IngredientCategory::Other,
    ];

    /// Case-insensitive; anything unrecognized is `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "protein" => IngredientCategory::Protein,
            "grain" => IngredientCategory::Grain,
            "vegetable" => IngredientCategory::Vegetable,
            "dairy" => IngredientCategory::Dairy,
            "oil" => IngredientCategory::Oil,
            "spice" => IngredientCategory::Spice,
            _ => IngredientCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Protein => "protein",
            IngredientCategory::Grain => "grain",
            IngredientCategory::Vegetable => "vegetable",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Oil => "oil",
            IngredientCategory::Spice => "spice",
            IngredientCategory::Other => "other",
        }
    }

    /// kg CO2e per kg, used when neither the exact nor the fuzzy tier matches.
    pub fn average_carbon_per_kg(&self) -> f64 {
        match self {
            IngredientCategory::Protein => 8.5,
            IngredientCategory::Grain => 1.5,
            IngredientCategory::Vegetable => 0.5,
            IngredientCategory::Dairy => 8.0,
            IngredientCategory::Oil => 6.2,
            IngredientCategory::Spice => 4.0,
            IngredientCategory::Other => 2.0,
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IngredientCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label
            .as_deref()
            .map(IngredientCategory::from_label)
            .unwrap_or_default())
    }
}
