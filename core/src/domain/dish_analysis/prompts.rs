const RESPONSE_FORMAT: &str = r#"Respond with a single JSON object and nothing else:
{
  "dishName": "<name of the dish>",
  "ingredients": [
    {
      "name": "<ingredient>",
      "category": "protein|grain|vegetable|dairy|oil|spice|other",
      "estimatedQuantityGrams": <grams in one typical serving>,
      "confidence": <0.0 to 1.0>
    }
  ],
  "overallConfidence": <0.0 to 1.0>
}"#;

pub fn build_text_prompt(dish_name: &str) -> String {
    format!(
        "You are a food analyst estimating the ingredients of a dish for a carbon footprint calculation.\n\
         List the main ingredients of one typical serving of \"{dish_name}\", with an estimated weight in grams \
         for each and how confident you are that it is present.\n\n{RESPONSE_FORMAT}"
    )
}

pub fn build_image_prompt() -> String {
    format!(
        "You are a food analyst estimating the ingredients of a dish for a carbon footprint calculation.\n\
         Identify the dish in this photo and list its visible or probable main ingredients, with an estimated \
         weight in grams for each based on the portion shown and how confident you are that it is present.\n\n\
         {RESPONSE_FORMAT}"
    )
}
