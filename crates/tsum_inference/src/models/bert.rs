use std::sync::{Arc, Mutex};

use rust_bert::bart::{
    BartConfigResources, BartMergesResources, BartModelResources, BartVocabResources,
};
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::summarization::{SummarizationConfig, SummarizationModel};
use rust_bert::resources::RemoteResource;
use rust_bert::t5::{T5ConfigResources, T5ModelResources, T5VocabResources};
use tracing::info;

use tsum_core::{Error, GenerationParams, ModelKind, ModelLoader, Result, SummaryModel};

/// Real BART/T5 summarization backed by `rust-bert`'s pipeline.
///
/// The pipeline fixes its generation bounds at load time, so handles are
/// created with the default request bounds; per-request bounds are accepted
/// but not renegotiated per call.
pub struct BertModel {
    kind: ModelKind,
    // The pipeline is not Sync; serialize access behind a lock.
    pipeline: Mutex<SummarizationModel>,
}

impl BertModel {
    pub fn load(kind: ModelKind, params: &GenerationParams) -> Result<Self> {
        info!("🧠 Loading pretrained weights: {}", kind.pretrained());
        let mut config = match kind {
            ModelKind::Bart => SummarizationConfig::new(
                ModelType::Bart,
                ModelResource::Torch(Box::new(RemoteResource::from_pretrained(
                    BartModelResources::BART_CNN,
                ))),
                RemoteResource::from_pretrained(BartConfigResources::BART_CNN),
                RemoteResource::from_pretrained(BartVocabResources::BART_CNN),
                Some(RemoteResource::from_pretrained(
                    BartMergesResources::BART_CNN,
                )),
            ),
            ModelKind::T5 => SummarizationConfig::new(
                ModelType::T5,
                ModelResource::Torch(Box::new(RemoteResource::from_pretrained(
                    T5ModelResources::T5_BASE,
                ))),
                RemoteResource::from_pretrained(T5ConfigResources::T5_BASE),
                RemoteResource::from_pretrained(T5VocabResources::T5_BASE),
                None,
            ),
        };
        config.min_length = params.min_length as i64;
        config.max_length = Some(params.max_length as i64);
        config.do_sample = !params.deterministic;

        let pipeline =
            SummarizationModel::new(config).map_err(|e| Error::Inference(e.to_string()))?;
        Ok(Self {
            kind,
            pipeline: Mutex::new(pipeline),
        })
    }
}

impl SummaryModel for BertModel {
    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn generate(&self, text: &str, _params: &GenerationParams) -> Result<String> {
        // rust-bert's T5 pipeline prepends the task prefix itself; drop the
        // orchestrator's copy to avoid doubling it.
        let text = match self.kind.task_prefix() {
            Some(prefix) => text.strip_prefix(prefix).unwrap_or(text),
            None => text,
        };

        let pipeline = self
            .pipeline
            .lock()
            .map_err(|_| Error::Runtime("summarization pipeline lock poisoned".to_string()))?;
        let mut summaries = pipeline
            .summarize(&[text])
            .map_err(|e| Error::Inference(e.to_string()))?;
        summaries
            .pop()
            .ok_or_else(|| Error::Inference("model returned no output".to_string()))
    }
}

pub struct BertLoader;

impl ModelLoader for BertLoader {
    fn load(&self, kind: ModelKind) -> Result<Arc<dyn SummaryModel>> {
        Ok(Arc::new(BertModel::load(
            kind,
            &GenerationParams::default(),
        )?))
    }
}
