mod gemini_client;
mod offline_client;

pub use gemini_client::GeminiLLMClient;
pub use offline_client::OfflineLLMClient;

use bytes::Bytes;

use crate::domain::{
    common::{LLMConfig, LLMProviderKind, entities::app_errors::CoreError},
    dish_analysis::ports::LLMClient,
};

/// The configured backend, chosen once at startup.
#[derive(Debug, Clone)]
pub enum LLMProvider {
    Gemini(GeminiLLMClient),
    Offline(OfflineLLMClient),
}

impl LLMProvider {
    pub fn from_config(config: &LLMConfig) -> Result<Self, CoreError> {
        match config.provider {
            LLMProviderKind::Offline => Ok(LLMProvider::Offline(OfflineLLMClient)),
            LLMProviderKind::Gemini => {
                let api_key = config
                    .gemini_api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| {
                        CoreError::Invalid(
                            "GEMINI_API_KEY is required for the gemini provider".to_string(),
                        )
                    })?;
                let client =
                    GeminiLLMClient::new(api_key, config.gemini_model.clone(), config.timeout)?;
                Ok(LLMProvider::Gemini(client))
            }
        }
    }
}

impl LLMClient for LLMProvider {
    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        match self {
            LLMProvider::Gemini(client) => {
                client
                    .generate_with_image(prompt, image_data, mime_type, response_schema)
                    .await
            }
            LLMProvider::Offline(client) => {
                client
                    .generate_with_image(prompt, image_data, mime_type, response_schema)
                    .await
            }
        }
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        match self {
            LLMProvider::Gemini(client) => client.generate_with_text(prompt, response_schema).await,
            LLMProvider::Offline(client) => {
                client.generate_with_text(prompt, response_schema).await
            }
        }
    }

    fn model_name(&self) -> String {
        match self {
            LLMProvider::Gemini(client) => client.model_name(),
            LLMProvider::Offline(client) => client.model_name(),
        }
    }
}
