use std::sync::Arc;

use captioner_core::pipeline::caption_service::CaptionService;

/// Shared by every request; the service owns the one loaded engine.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CaptionService>,
}

impl AppState {
    pub fn new(service: CaptionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
