use std::num::NonZeroUsize;

use tsum_core::chunk::DEFAULT_CHUNK_BUDGET;

pub mod models;
pub mod registry;
pub mod summarizer;

pub use models::create_loader;
pub use registry::{ModelRegistry, DEFAULT_CACHE_CAPACITY};
pub use summarizer::{Summarizer, DEFAULT_INFERENCE_PERMITS};

/// Orchestrator configuration, assembled from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-chunk character budget for splitting long inputs.
    pub chunk_budget: usize,
    /// How many loaded model handles to keep before evicting.
    pub cache_capacity: NonZeroUsize,
    /// Bound on concurrent blocking inference calls across all requests.
    pub inference_permits: usize,
    /// Substitute the default model for unrecognized identifiers instead of
    /// rejecting them.
    pub fallback_to_default: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_budget: DEFAULT_CHUNK_BUDGET,
            cache_capacity: NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap(),
            inference_permits: DEFAULT_INFERENCE_PERMITS,
            fallback_to_default: false,
        }
    }
}

pub mod prelude {
    pub use super::{create_loader, Config, ModelRegistry, Summarizer};
    pub use tsum_core::{
        Error, GenerationParams, ModelKind, Result, SummarizeRequest, SummaryModel,
    };
}
