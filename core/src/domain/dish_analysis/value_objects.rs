use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    carbon::IngredientCategory,
    dish_analysis::entities::{AnalysisMethod, DishAnalysis, Ingredient},
};

#[derive(Debug, Clone)]
pub struct EstimateFromTextInput {
    pub dish: String,
}

#[derive(Debug, Clone)]
pub struct EstimateFromImageInput {
    pub file_name: String,
    /// Declared by the uploader; derived from the extension when absent.
    pub content_type: Option<String>,
    pub image_data: Bytes,
}

/// Response body shared by the text and image endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarbonEstimate {
    pub dish: String,
    pub estimated_carbon_kg: f64,
    pub confidence: f64,
    pub ingredients: Vec<IngredientEstimate>,
    pub metadata: EstimateMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEstimate {
    pub name: String,
    pub carbon_kg: f64,
    #[schema(example = "150g")]
    pub estimated_quantity: String,
    pub category: IngredientCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateMetadata {
    pub analysis_method: AnalysisMethod,
    pub analyzed_at: DateTime<Utc>,
    pub model_used: String,
    pub processing_time_ms: u64,
}

impl IngredientEstimate {
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            carbon_kg: ingredient.total_carbon_kg(),
            estimated_quantity: format_grams(ingredient.estimated_quantity_grams),
            category: ingredient.category,
        }
    }
}

impl CarbonEstimate {
    /// `analysis` must already carry resolved carbon values.
    pub fn from_analysis(
        analysis: &DishAnalysis,
        model_used: String,
        analyzed_at: DateTime<Utc>,
        processing_time: Duration,
    ) -> Self {
        Self {
            dish: analysis.dish_name.clone(),
            estimated_carbon_kg: analysis.total_carbon_kg(),
            confidence: analysis.overall_confidence,
            ingredients: analysis
                .ingredients
                .iter()
                .map(IngredientEstimate::from_ingredient)
                .collect(),
            metadata: EstimateMetadata {
                analysis_method: analysis.analysis_method,
                analyzed_at,
                model_used,
                processing_time_ms: u64::try_from(processing_time.as_millis()).unwrap_or(u64::MAX),
            },
        }
    }
}

fn format_grams(grams: f64) -> String {
    format!("{}g", grams.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grams_rounds_to_integer() {
        assert_eq!(format_grams(150.0), "150g");
        assert_eq!(format_grams(12.6), "13g");
        assert_eq!(format_grams(0.0), "0g");
    }

    #[test]
    fn test_estimate_serializes_camel_case() {
        let mut rice = Ingredient::new("Rice", IngredientCategory::Grain, 200.0, 0.9);
        rice.carbon_per_kg = 2.7;
        let analysis = DishAnalysis {
            dish_name: "Fried Rice".to_string(),
            ingredients: vec![rice],
            overall_confidence: 0.8,
            analysis_method: AnalysisMethod::Text,
        };

        let estimate = CarbonEstimate::from_analysis(
            &analysis,
            "gemini-2.0-flash".to_string(),
            Utc::now(),
            Duration::from_millis(42),
        );
        let json = serde_json::to_value(&estimate).unwrap();

        assert_eq!(json["dish"], "Fried Rice");
        assert_eq!(json["confidence"], 0.8);
        assert!((json["estimatedCarbonKg"].as_f64().unwrap() - 0.54).abs() < 1e-9);
        assert_eq!(json["ingredients"][0]["estimatedQuantity"], "200g");
        assert_eq!(json["ingredients"][0]["category"], "grain");
        assert_eq!(json["metadata"]["analysisMethod"], "text");
        assert_eq!(json["metadata"]["modelUsed"], "gemini-2.0-flash");
        assert_eq!(json["metadata"]["processingTimeMs"], 42);
        assert!(json["metadata"]["analyzedAt"].as_str().unwrap().ends_with('Z'));
    }
}
