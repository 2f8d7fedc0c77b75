// Shared application state handed to every transport.

use crate::modules::smart_meters::core::ports::MeterStore;
use crate::modules::smart_meters::use_cases::query_meter::handler::MeterQueryHandler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<MeterQueryHandler<dyn MeterStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn MeterStore>) -> Self {
        Self {
            queries: Arc::new(MeterQueryHandler::new(store)),
        }
    }
}
