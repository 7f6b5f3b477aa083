//! Turns loosely structured model output into a [`DishAnalysis`].
//!
//! The JSON object is taken from the first `{` to the last `}`, so prose or
//! markdown fences around it are ignored. Unrelated braces inside that span
//! (for example a stray `{}` in trailing prose) are not balanced out and
//! usually make the decode fail, which ends in the fallback path.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::domain::{
    carbon::IngredientCategory,
    dish_analysis::{
        entities::{DishAnalysis, Ingredient, InputType},
        fallback::{dish_name_from_file, fallback_analysis},
    },
};

const UNKNOWN_INGREDIENT: &str = "Unknown";

/// What the caller already knows about the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisContext {
    Text { dish_name: String },
    Image { file_name: String },
}

impl AnalysisContext {
    pub fn input_type(&self) -> InputType {
        match self {
            AnalysisContext::Text { .. } => InputType::Text,
            AnalysisContext::Image { .. } => InputType::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(DishAnalysis),
    Unparsable(UnparsableReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnparsableReason {
    #[error("no JSON object found in response")]
    MissingBraces,

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response has no ingredient list")]
    MissingIngredients,
}

// Keys are matched after `normalize_key`, hence the flat lowercase renames.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default, rename = "dishname")]
    dish_name: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<RawIngredient>>,
    #[serde(default, rename = "overallconfidence")]
    overall_confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawIngredient {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "estimatedquantitygrams")]
    estimated_quantity_grams: Option<f64>,
    #[serde(default)]
    confidence: Option<f64>,
}

pub struct ResponseInterpreter;

impl ResponseInterpreter {
    pub fn interpret(raw: &str, context: &AnalysisContext) -> ParseOutcome {
        match Self::try_interpret(raw, context) {
            Ok(analysis) => ParseOutcome::Parsed(analysis),
            Err(reason) => ParseOutcome::Unparsable(reason),
        }
    }

    /// Like [`interpret`](Self::interpret), with `Unparsable` mapped to the
    /// fallback analysis for the context.
    pub fn interpret_or_fallback(raw: &str, context: &AnalysisContext) -> DishAnalysis {
        match Self::interpret(raw, context) {
            ParseOutcome::Parsed(analysis) => analysis,
            ParseOutcome::Unparsable(reason) => {
                warn!(%reason, "LLM response unparsable, using fallback analysis");
                fallback_analysis(context)
            }
        }
    }

    fn try_interpret(
        raw: &str,
        context: &AnalysisContext,
    ) -> Result<DishAnalysis, UnparsableReason> {
        let json = extract_object(raw).ok_or(UnparsableReason::MissingBraces)?;

        let value: Value =
            serde_json::from_str(json).map_err(|e| UnparsableReason::Decode(e.to_string()))?;
        let decoded: RawAnalysis = serde_json::from_value(normalize_keys(value))
            .map_err(|e| UnparsableReason::Decode(e.to_string()))?;

        let ingredients = decoded
            .ingredients
            .ok_or(UnparsableReason::MissingIngredients)?;

        let dish_name = match context {
            AnalysisContext::Text { dish_name } => dish_name.clone(),
            AnalysisContext::Image { file_name } => decoded
                .dish_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| dish_name_from_file(file_name)),
        };

        Ok(DishAnalysis {
            dish_name,
            ingredients: ingredients.into_iter().map(into_ingredient).collect(),
            overall_confidence: decoded.overall_confidence.unwrap_or_default(),
            analysis_method: context.input_type().method(),
        })
    }
}

fn into_ingredient(raw: RawIngredient) -> Ingredient {
    let name = raw
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_INGREDIENT.to_string());
    let category = raw
        .category
        .as_deref()
        .map(IngredientCategory::from_label)
        .unwrap_or_default();

    // Confidence passes through unclamped; quantities cannot be negative.
    Ingredient::new(
        name,
        category,
        raw.estimated_quantity_grams.unwrap_or_default().max(0.0),
        raw.confidence.unwrap_or_default(),
    )
}

fn extract_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut normalized = Map::with_capacity(object.len());
            for (key, value) in object {
                normalized
                    .entry(normalize_key(&key))
                    .or_insert_with(|| normalize_keys(value));
            }
            Value::Object(normalized)
        }
        Value::Array(values) => Value::Array(values.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}
