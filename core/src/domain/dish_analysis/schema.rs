use serde_json::json;

/// Returns the JSON schema for dish analysis LLM responses
pub fn get_dish_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "dishName": { "type": "string" },
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "category": {
                            "type": "string",
                            "enum": ["protein", "grain", "vegetable", "dairy", "oil", "spice", "other"]
                        },
                        "estimatedQuantityGrams": { "type": "number" },
                        "confidence": { "type": "number" }
                    },
                    "required": ["name", "category", "estimatedQuantityGrams", "confidence"]
                }
            },
            "overallConfidence": { "type": "number" }
        },
        "required": ["ingredients", "overallConfidence"]
    })
}
