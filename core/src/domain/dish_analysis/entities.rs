use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::carbon::IngredientCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub category: IngredientCategory,
    /// kg CO2e per kg; only the carbon resolver sets this.
    pub carbon_per_kg: f64,
    pub estimated_quantity_grams: f64,
    pub confidence: f64,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        category: IngredientCategory,
        estimated_quantity_grams: f64,
        confidence: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            carbon_per_kg: 0.0,
            estimated_quantity_grams,
            confidence,
        }
    }

    pub fn total_carbon_kg(&self) -> f64 {
        (self.estimated_quantity_grams / 1000.0) * self.carbon_per_kg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InputType {
    Text,
    Image,
}

impl InputType {
    pub fn method(&self) -> AnalysisMethod {
        match self {
            InputType::Text => AnalysisMethod::Text,
            InputType::Image => AnalysisMethod::Image,
        }
    }

    pub fn fallback_method(&self) -> AnalysisMethod {
        match self {
            InputType::Text => AnalysisMethod::TextFallback,
            InputType::Image => AnalysisMethod::ImageFallback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AnalysisMethod {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "text (fallback)")]
    TextFallback,
    #[serde(rename = "image (fallback)")]
    ImageFallback,
}

impl AnalysisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::Text => "text",
            AnalysisMethod::Image => "image",
            AnalysisMethod::TextFallback => "text (fallback)",
            AnalysisMethod::ImageFallback => "image (fallback)",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            AnalysisMethod::TextFallback | AnalysisMethod::ImageFallback
        )
    }
}

impl fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishAnalysis {
    pub dish_name: String,
    /// Order as returned by the model.
    pub ingredients: Vec<Ingredient>,
    pub overall_confidence: f64,
    pub analysis_method: AnalysisMethod,
}

impl DishAnalysis {
    pub fn total_carbon_kg(&self) -> f64 {
        self.ingredients.iter().map(Ingredient::total_carbon_kg).sum()
    }
}
