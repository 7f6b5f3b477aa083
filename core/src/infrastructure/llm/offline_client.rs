use bytes::Bytes;

use crate::domain::{common::entities::app_errors::CoreError, dish_analysis::ports::LLMClient};

/// Client used when no model is configured. Every call fails, so each
/// request is answered from the deterministic fallback analysis.
#[derive(Debug, Clone, Default)]
pub struct OfflineLLMClient;

impl LLMClient for OfflineLLMClient {
    async fn generate_with_image(
        &self,
        _prompt: String,
        _image_data: Bytes,
        _mime_type: String,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        Err(CoreError::ExternalServiceError(
            "no LLM provider configured".to_string(),
        ))
    }

    async fn generate_with_text(
        &self,
        _prompt: String,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        Err(CoreError::ExternalServiceError(
            "no LLM provider configured".to_string(),
        ))
    }

    fn model_name(&self) -> String {
        "offline".to_string()
    }
}
