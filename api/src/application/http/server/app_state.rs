use std::sync::Arc;

use carbonplate_core::application::CarbonplateService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: CarbonplateService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: CarbonplateService) -> Self {
        Self { args, service }
    }
}
