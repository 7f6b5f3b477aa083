use tracing::debug;

use crate::domain::{
    carbon::{table::CarbonTable, value_objects::IngredientCategory},
    dish_analysis::entities::Ingredient,
};

/// Which resolution tier produced a carbon value.
#[derive(Debug, Clone, PartialEq)]
pub enum CarbonMatch {
    Exact,
    Fuzzy { key: String },
    CategoryAverage(IngredientCategory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarbonResolution {
    pub carbon_per_kg: f64,
    pub matched: CarbonMatch,
}

/// Ingredients with their carbon values filled in, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIngredients {
    pub ingredients: Vec<Ingredient>,
    pub total_carbon_kg: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CarbonResolver<'a> {
    table: &'a CarbonTable,
}

impl<'a> CarbonResolver<'a> {
    pub fn new(table: &'a CarbonTable) -> Self {
        Self { table }
    }

    /// Exact name, then fuzzy substring, then category average. Never fails.
    pub fn resolve(&self, name: &str, category: IngredientCategory) -> CarbonResolution {
        if let Some(carbon_per_kg) = self.table.get_exact(name) {
            return CarbonResolution {
                carbon_per_kg,
                matched: CarbonMatch::Exact,
            };
        }

        if let Some((key, carbon_per_kg)) = self.table.find_fuzzy(name) {
            return CarbonResolution {
                carbon_per_kg,
                matched: CarbonMatch::Fuzzy {
                    key: key.to_string(),
                },
            };
        }

        CarbonResolution {
            carbon_per_kg: category.average_carbon_per_kg(),
            matched: CarbonMatch::CategoryAverage(category),
        }
    }

    pub fn resolve_one(&self, name: &str, category: IngredientCategory) -> f64 {
        self.resolve(name, category).carbon_per_kg
    }

    pub fn resolve_one_labelled(&self, name: &str, category_label: &str) -> f64 {
        self.resolve_one(name, IngredientCategory::from_label(category_label))
    }

    pub fn resolve_all(&self, ingredients: Vec<Ingredient>) -> ResolvedIngredients {
        let ingredients: Vec<Ingredient> = ingredients
            .into_iter()
            .map(|mut ingredient| {
                let resolution = self.resolve(&ingredient.name, ingredient.category);
                debug!(
                    ingredient = %ingredient.name,
                    category = %ingredient.category,
                    carbon_per_kg = resolution.carbon_per_kg,
                    matched = ?resolution.matched,
                    "resolved ingredient carbon"
                );
                ingredient.carbon_per_kg = resolution.carbon_per_kg;
                ingredient
            })
            .collect();

        let total_carbon_kg = ingredients.iter().map(Ingredient::total_carbon_kg).sum();

        ResolvedIngredients {
            ingredients,
            total_carbon_kg,
        }
    }
}
