use std::sync::Arc;

use dinedex_core::application::DinedexService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: Arc<DinedexService>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DinedexService) -> Self {
        Self {
            args,
            service: Arc::new(service),
        }
    }
}
