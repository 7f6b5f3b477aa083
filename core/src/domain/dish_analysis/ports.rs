use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    dish_analysis::value_objects::{
        CarbonEstimate, EstimateFromImageInput, EstimateFromTextInput,
    },
};

/// LLM Client trait for calling AI models
///
/// Implementations return the model's raw text; callers must not assume it
/// is well-formed JSON.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn model_name(&self) -> String;
}

/// Service trait for dish carbon estimation
#[cfg_attr(test, mockall::automock)]
pub trait CarbonEstimateService: Send + Sync {
    fn estimate_from_text(
        &self,
        input: EstimateFromTextInput,
    ) -> impl Future<Output = Result<CarbonEstimate, CoreError>> + Send;

    fn estimate_from_image(
        &self,
        input: EstimateFromImageInput,
    ) -> impl Future<Output = Result<CarbonEstimate, CoreError>> + Send;
}
