use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use tsum_core::chunk;
use tsum_core::{Error, ModelKind, Result, SummarizeRequest};

use crate::registry::ModelRegistry;
use crate::Config;

/// Default bound on concurrent blocking inference calls.
pub const DEFAULT_INFERENCE_PERMITS: usize = 4;

/// Request orchestration: validate, resolve the model, chunk the text, run
/// inference per chunk without blocking the request dispatcher, and join the
/// partial summaries in order.
pub struct Summarizer {
    registry: Arc<ModelRegistry>,
    semaphore: Arc<Semaphore>,
    chunk_budget: usize,
    fallback_to_default: bool,
}

impl Summarizer {
    pub fn new(registry: Arc<ModelRegistry>, config: &Config) -> Self {
        Self {
            registry,
            semaphore: Arc::new(Semaphore::new(config.inference_permits)),
            chunk_budget: config.chunk_budget,
            fallback_to_default: config.fallback_to_default,
        }
    }

    fn resolve_kind(&self, name: &str) -> Result<ModelKind> {
        match ModelKind::from_name(name) {
            Some(kind) => Ok(kind),
            None if self.fallback_to_default => {
                warn!(
                    "Unknown model '{}', falling back to {}",
                    name,
                    ModelKind::DEFAULT
                );
                Ok(ModelKind::DEFAULT)
            }
            None => Err(Error::UnknownModel(name.to_string())),
        }
    }

    pub async fn summarize(&self, req: &SummarizeRequest) -> Result<String> {
        if req.text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        if req.max_length == 0 {
            return Err(Error::Validation("max_length must be positive".to_string()));
        }
        if req.min_length > req.max_length {
            return Err(Error::Validation(format!(
                "min_length {} exceeds max_length {}",
                req.min_length, req.max_length
            )));
        }

        let kind = self.resolve_kind(&req.model_name)?;
        let model = self.registry.resolve(kind).await?;
        let params = req.params();

        let chunks = chunk::split_with_budget(&req.text, self.chunk_budget);
        debug!("Summarizing {} chunk(s) with {}", chunks.len(), kind);

        // Chunks run sequentially within a request; the semaphore bounds
        // blocking inference across all in-flight requests.
        let mut parts = Vec::with_capacity(chunks.len());
        for chunk_text in chunks {
            let input = match kind.task_prefix() {
                Some(prefix) => format!("{}{}", prefix, chunk_text),
                None => chunk_text,
            };
            let _permit = self
                .semaphore
                .acquire()
                .await
                .map_err(|e| Error::Runtime(e.to_string()))?;
            let model = model.clone();
            let part = tokio::task::spawn_blocking(move || model.generate(&input, &params))
                .await
                .map_err(|e| Error::Runtime(e.to_string()))??;
            parts.push(part);
        }

        Ok(parts.join(" "))
    }
}
