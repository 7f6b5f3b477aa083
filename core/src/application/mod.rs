use crate::{
    domain::common::{CarbonplateConfig, services::Service},
    infrastructure::llm::LLMProvider,
};

pub type CarbonplateService = Service<LLMProvider>;

pub fn create_service(config: CarbonplateConfig) -> Result<CarbonplateService, anyhow::Error> {
    let llm_client = LLMProvider::from_config(&config.llm)?;

    tracing::info!(
        provider = ?config.llm.provider,
        model = %config.llm.gemini_model,
        "LLM provider configured"
    );

    Ok(Service::new(llm_client, config.llm.timeout))
}
