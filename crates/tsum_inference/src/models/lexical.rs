use std::sync::Arc;

use tsum_core::{GenerationParams, ModelKind, ModelLoader, Result, SummaryModel};

/// Extractive summarizer: keeps the leading sentences of the input until the
/// word budget is spent. Deterministic and dependency-free, used wherever
/// real model weights are unavailable (tests, builds without the `bert`
/// feature).
pub struct LexicalModel {
    kind: ModelKind,
}

impl LexicalModel {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind }
    }
}

impl SummaryModel for LexicalModel {
    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
        // The orchestrator prepends the task prefix for models that want one;
        // it is an instruction to the model, not part of the content.
        let text = match self.kind.task_prefix() {
            Some(prefix) => text.strip_prefix(prefix).unwrap_or(text),
            None => text,
        };

        let max_words = params.max_length as usize;
        let mut summary = String::new();
        let mut words = 0usize;
        for sentence in text.split_inclusive(". ") {
            let sentence_words = sentence.split_whitespace().count();
            if words > 0 && words + sentence_words > max_words {
                break;
            }
            summary.push_str(sentence);
            words += sentence_words;
            if words >= max_words {
                break;
            }
        }
        Ok(summary.trim_end().to_string())
    }
}

pub struct LexicalLoader;

impl ModelLoader for LexicalLoader {
    fn load(&self, kind: ModelKind) -> Result<Arc<dyn SummaryModel>> {
        Ok(Arc::new(LexicalModel::new(kind)))
    }
}
