use serde::{Deserialize, Serialize};

/// Pre-trained summarization model families selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Bart,
    T5,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Bart, ModelKind::T5];

    pub const DEFAULT: ModelKind = ModelKind::Bart;

    /// Case-insensitive lookup from a request's `model_name` field.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bart" => Some(ModelKind::Bart),
            "t5" => Some(ModelKind::T5),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Bart => "bart",
            ModelKind::T5 => "t5",
        }
    }

    /// Upstream identifier of the pretrained weights this kind resolves to.
    pub fn pretrained(&self) -> &'static str {
        match self {
            ModelKind::Bart => "facebook/bart-large-cnn",
            ModelKind::T5 => "t5-base",
        }
    }

    /// Text prepended to every chunk before generation. Only the T5 family
    /// is trained with an explicit task prefix.
    pub fn task_prefix(&self) -> Option<&'static str> {
        match self {
            ModelKind::Bart => None,
            ModelKind::T5 => Some("summarize: "),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Generation bounds passed through to the model runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    /// Deterministic decoding: no sampling, reproducible output.
    pub deterministic: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            min_length: default_min_length(),
            deterministic: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_min_length")]
    pub min_length: u32,
}

fn default_model_name() -> String {
    ModelKind::DEFAULT.name().to_string()
}

fn default_max_length() -> u32 {
    130
}

fn default_min_length() -> u32 {
    30
}

impl SummarizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_name: default_model_name(),
            max_length: default_max_length(),
            min_length: default_min_length(),
        }
    }

    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            max_length: self.max_length,
            min_length: self.min_length,
            deterministic: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
