use crate::domain::{carbon::CarbonTable, dish_analysis::ports::LLMClient};

/// Request-scoped collaborators shared by every service implementation.
///
/// The carbon table is the process-wide static one; nothing here is mutated
/// after construction, so the service is cloned freely into handlers.
#[derive(Clone)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: LLM,
    pub(crate) carbon_table: &'static CarbonTable,
    pub(crate) llm_timeout: std::time::Duration,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, llm_timeout: std::time::Duration) -> Self {
        Self {
            llm_client,
            carbon_table: CarbonTable::global(),
            llm_timeout,
        }
    }
}
