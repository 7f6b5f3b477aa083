use std::future::Future;
use std::time::Instant;

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::domain::{
    carbon::CarbonResolver,
    common::{entities::app_errors::CoreError, services::Service},
    dish_analysis::{
        entities::DishAnalysis,
        fallback::fallback_analysis,
        interpreter::{AnalysisContext, ResponseInterpreter},
        policies::{ensure_valid_dish_name, ensure_valid_image, mime_type_for},
        ports::{CarbonEstimateService, LLMClient},
        prompts::{build_image_prompt, build_text_prompt},
        schema::get_dish_analysis_schema,
        value_objects::{CarbonEstimate, EstimateFromImageInput, EstimateFromTextInput},
    },
};

impl<LLM> CarbonEstimateService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip(self, input), fields(dish = %input.dish))]
    async fn estimate_from_text(
        &self,
        input: EstimateFromTextInput,
    ) -> Result<CarbonEstimate, CoreError> {
        let started = Instant::now();
        let dish_name = ensure_valid_dish_name(&input.dish)?;

        let generation = self
            .with_timeout(
                self.llm_client
                    .generate_with_text(build_text_prompt(&dish_name), get_dish_analysis_schema()),
            )
            .await;

        let context = AnalysisContext::Text { dish_name };
        let analysis = analysis_from_generation(generation, &context);

        Ok(self.build_estimate(analysis, started))
    }

    #[instrument(
        skip(self, input),
        fields(file_name = %input.file_name, size_bytes = input.image_data.len())
    )]
    async fn estimate_from_image(
        &self,
        input: EstimateFromImageInput,
    ) -> Result<CarbonEstimate, CoreError> {
        let started = Instant::now();
        ensure_valid_image(&input.file_name, input.image_data.len())?;

        let mime_type = input
            .content_type
            .filter(|content_type| content_type.starts_with("image/"))
            .or_else(|| mime_type_for(&input.file_name).map(str::to_string))
            .ok_or_else(|| CoreError::Invalid("unable to determine image type".to_string()))?;

        let generation = self
            .with_timeout(self.llm_client.generate_with_image(
                build_image_prompt(),
                input.image_data,
                mime_type,
                get_dish_analysis_schema(),
            ))
            .await;

        let context = AnalysisContext::Image {
            file_name: input.file_name,
        };
        let analysis = analysis_from_generation(generation, &context);

        Ok(self.build_estimate(analysis, started))
    }
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    async fn with_timeout<F>(&self, generation: F) -> Result<String, CoreError>
    where
        F: Future<Output = Result<String, CoreError>>,
    {
        tokio::time::timeout(self.llm_timeout, generation)
            .await
            .unwrap_or(Err(CoreError::Timeout))
    }

    fn build_estimate(&self, analysis: DishAnalysis, started: Instant) -> CarbonEstimate {
        let resolved = CarbonResolver::new(self.carbon_table).resolve_all(analysis.ingredients);
        let analysis = DishAnalysis {
            ingredients: resolved.ingredients,
            ..analysis
        };

        info!(
            dish = %analysis.dish_name,
            method = %analysis.analysis_method,
            fallback = analysis.analysis_method.is_fallback(),
            ingredients = analysis.ingredients.len(),
            total_carbon_kg = resolved.total_carbon_kg,
            "carbon estimate computed"
        );

        CarbonEstimate::from_analysis(
            &analysis,
            self.llm_client.model_name(),
            Utc::now(),
            started.elapsed(),
        )
    }
}

/// A failed call and an unparsable reply both end in the fallback analysis.
fn analysis_from_generation(
    generation: Result<String, CoreError>,
    context: &AnalysisContext,
) -> DishAnalysis {
    match generation {
        Ok(raw) => ResponseInterpreter::interpret_or_fallback(&raw, context),
        Err(e) => {
            error!(error = %e, "LLM generation failed, using fallback analysis");
            fallback_analysis(context)
        }
    }
}
