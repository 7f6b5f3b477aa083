use std::time::Duration;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct CarbonplateConfig {
    pub llm: LLMConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LLMProviderKind {
    Gemini,
    Offline,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub provider: LLMProviderKind,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub timeout: Duration,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProviderKind::Offline,
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}
