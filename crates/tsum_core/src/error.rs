use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty text input")]
    EmptyInput,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
