//! Deterministic analyses used when the model output cannot be interpreted
//! or the model could not be reached.

use std::path::Path;

use crate::domain::{
    carbon::IngredientCategory,
    dish_analysis::{
        entities::{DishAnalysis, Ingredient, InputType},
        interpreter::AnalysisContext,
    },
};

const GENERIC_INGREDIENT: &str = "Mixed ingredients";
const GENERIC_QUANTITY_GRAMS: f64 = 250.0;
const TEXT_FALLBACK_CONFIDENCE: f64 = 0.7;
const GENERIC_TEXT_CONFIDENCE: f64 = 0.5;
const IMAGE_FALLBACK_CONFIDENCE: f64 = 0.3;
const UNKNOWN_DISH: &str = "Unknown Dish";

pub fn fallback_analysis(context: &AnalysisContext) -> DishAnalysis {
    match context {
        AnalysisContext::Text { dish_name } => text_fallback(dish_name),
        AnalysisContext::Image { file_name } => image_fallback(file_name),
    }
}

/// Keyword guesses from the dish name; a generic entry when nothing matches.
pub fn text_fallback(dish_name: &str) -> DishAnalysis {
    let lower = dish_name.to_lowercase();
    let mut ingredients = Vec::new();

    if lower.contains("chicken") {
        ingredients.push(Ingredient::new(
            "Chicken",
            IngredientCategory::Protein,
            150.0,
            0.8,
        ));
        if lower.contains("biryani") {
            ingredients.extend([
                Ingredient::new("Basmati Rice", IngredientCategory::Grain, 200.0, 0.9),
                Ingredient::new("Onions", IngredientCategory::Vegetable, 50.0, 0.7),
                Ingredient::new("Spices", IngredientCategory::Spice, 10.0, 0.8),
                Ingredient::new("Cooking Oil", IngredientCategory::Oil, 15.0, 0.7),
            ]);
        }
    } else if lower.contains("beef") {
        ingredients.push(Ingredient::new("Beef", IngredientCategory::Protein, 150.0, 0.8));
    } else if lower.contains("pizza") {
        ingredients.extend([
            Ingredient::new("Wheat Flour", IngredientCategory::Grain, 100.0, 0.8),
            Ingredient::new("Cheese", IngredientCategory::Dairy, 80.0, 0.9),
            Ingredient::new("Tomato Sauce", IngredientCategory::Vegetable, 30.0, 0.8),
        ]);
    } else if lower.contains("rice") || lower.contains("biryani") {
        ingredients.push(Ingredient::new("Rice", IngredientCategory::Grain, 200.0, 0.8));
    }

    if ingredients.is_empty() {
        return generic_fallback(dish_name, InputType::Text);
    }

    DishAnalysis {
        dish_name: dish_name.to_string(),
        ingredients,
        overall_confidence: TEXT_FALLBACK_CONFIDENCE,
        analysis_method: InputType::Text.fallback_method(),
    }
}

/// File names say little about the food, so no keyword rules apply here.
pub fn image_fallback(file_name: &str) -> DishAnalysis {
    generic_fallback(dish_name_from_file(file_name), InputType::Image)
}

/// A single "Mixed ingredients" entry of 250 g.
pub fn generic_fallback(dish_name: impl Into<String>, input_type: InputType) -> DishAnalysis {
    let (ingredient_confidence, overall_confidence) = match input_type {
        InputType::Text => (GENERIC_TEXT_CONFIDENCE, TEXT_FALLBACK_CONFIDENCE),
        InputType::Image => (IMAGE_FALLBACK_CONFIDENCE, IMAGE_FALLBACK_CONFIDENCE),
    };

    DishAnalysis {
        dish_name: dish_name.into(),
        ingredients: vec![Ingredient::new(
            GENERIC_INGREDIENT,
            IngredientCategory::Other,
            GENERIC_QUANTITY_GRAMS,
            ingredient_confidence,
        )],
        overall_confidence,
        analysis_method: input_type.fallback_method(),
    }
}

/// File name without directory or extension.
pub fn dish_name_from_file(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::trim)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(UNKNOWN_DISH)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dish_analysis::entities::AnalysisMethod;

    fn names(analysis: &DishAnalysis) -> Vec<&str> {
        analysis
            .ingredients
            .iter()
            .map(|ingredient| ingredient.name.as_str())
            .collect()
    }

    #[test]
    fn test_chicken_biryani_stacks_rules() {
        let analysis = text_fallback("Chicken Biryani");
        assert_eq!(
            names(&analysis),
            vec!["Chicken", "Basmati Rice", "Onions", "Spices", "Cooking Oil"]
        );
        assert_eq!(analysis.analysis_method, AnalysisMethod::TextFallback);
        assert_eq!(analysis.overall_confidence, 0.7);
        assert_eq!(analysis.dish_name, "Chicken Biryani");
    }

    #[test]
    fn test_chicken_takes_precedence_over_rice() {
        let analysis = text_fallback("chicken fried rice");
        assert_eq!(names(&analysis), vec!["Chicken"]);
    }

    #[test]
    fn test_beef_and_pizza_rules() {
        assert_eq!(names(&text_fallback("Beef Stew")), vec!["Beef"]);
        assert_eq!(
            names(&text_fallback("Margherita PIZZA")),
            vec!["Wheat Flour", "Cheese", "Tomato Sauce"]
        );
        assert_eq!(names(&text_fallback("beef pizza")), vec!["Beef"]);
    }

    #[test]
    fn test_rice_or_biryani_without_meat() {
        assert_eq!(names(&text_fallback("Vegetable Biryani")), vec!["Rice"]);
        assert_eq!(names(&text_fallback("Fried Rice")), vec!["Rice"]);
    }

    #[test]
    fn test_unknown_dish_gets_generic_entry() {
        let analysis = text_fallback("Unknown Dish XYZ");
        assert_eq!(names(&analysis), vec!["Mixed ingredients"]);
        let ingredient = &analysis.ingredients[0];
        assert_eq!(ingredient.category, IngredientCategory::Other);
        assert_eq!(ingredient.estimated_quantity_grams, 250.0);
        assert_eq!(ingredient.confidence, 0.5);
        assert_eq!(analysis.overall_confidence, 0.7);
    }

    #[test]
    fn test_fallback_never_sets_carbon() {
        let analysis = text_fallback("Chicken Biryani");
        assert!(analysis.ingredients.iter().all(|i| i.carbon_per_kg == 0.0));
    }

    #[test]
    fn test_image_fallback_is_generic() {
        let analysis = image_fallback("chicken_biryani.jpg");
        assert_eq!(analysis.dish_name, "chicken_biryani");
        assert_eq!(names(&analysis), vec!["Mixed ingredients"]);
        assert_eq!(analysis.ingredients[0].confidence, 0.3);
        assert_eq!(analysis.overall_confidence, 0.3);
        assert_eq!(analysis.analysis_method, AnalysisMethod::ImageFallback);
    }

    #[test]
    fn test_generic_fallback_per_input_type() {
        let text = generic_fallback("Mystery Stew", InputType::Text);
        assert_eq!(text.dish_name, "Mystery Stew");
        assert_eq!(text.ingredients[0].confidence, 0.5);
        assert_eq!(text.overall_confidence, 0.7);
        assert_eq!(text.analysis_method, AnalysisMethod::TextFallback);
        assert!(text.analysis_method.is_fallback());

        let image = generic_fallback("photo", InputType::Image);
        assert_eq!(image.ingredients[0].confidence, 0.3);
        assert_eq!(image.overall_confidence, 0.3);
        assert_eq!(image.analysis_method, AnalysisMethod::ImageFallback);
        assert_eq!(image.ingredients[0].estimated_quantity_grams, 250.0);
    }

    #[test]
    fn test_fallback_analysis_follows_context() {
        let text = fallback_analysis(&AnalysisContext::Text {
            dish_name: "Beef Stew".to_string(),
        });
        assert_eq!(names(&text), vec!["Beef"]);
        assert_eq!(text.analysis_method, AnalysisMethod::TextFallback);

        let image = fallback_analysis(&AnalysisContext::Image {
            file_name: "beef_stew.png".to_string(),
        });
        assert_eq!(image.dish_name, "beef_stew");
        assert_eq!(names(&image), vec!["Mixed ingredients"]);
    }

    #[test]
    fn test_dish_name_from_file() {
        assert_eq!(dish_name_from_file("uploads/pad thai.jpeg"), "pad thai");
        assert_eq!(dish_name_from_file("ramen"), "ramen");
        assert_eq!(dish_name_from_file(""), "Unknown Dish");
    }
}
