use std::sync::Arc;

use crate::types::{GenerationParams, ModelKind};
use crate::Result;

/// A loaded, ready-to-invoke summarization model.
///
/// `generate` is synchronous and may block for the duration of the inference
/// call. Async callers must offload it to a blocking worker instead of
/// invoking it on the request path.
pub trait SummaryModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Generate a summary of `text` within the given length bounds.
    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String>;
}

/// Creates model handles. Loading is assumed expensive; callers memoize the
/// returned handles and never load the same kind twice.
pub trait ModelLoader: Send + Sync {
    /// Load the model for `kind`. Blocking; run on a blocking worker.
    fn load(&self, kind: ModelKind) -> Result<Arc<dyn SummaryModel>>;
}
