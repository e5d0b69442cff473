use std::sync::Arc;
use std::time::Instant;

use tsum_inference::{ModelRegistry, Summarizer};

pub struct AppState {
    pub summarizer: Summarizer,
    pub registry: Arc<ModelRegistry>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(summarizer: Summarizer, registry: Arc<ModelRegistry>) -> Self {
        Self {
            summarizer,
            registry,
            started_at: Instant::now(),
        }
    }
}
