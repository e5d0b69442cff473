pub mod chunk;
pub mod error;
pub mod models;
pub mod types;

pub use error::Error;
pub use models::{ModelLoader, SummaryModel};
pub use types::{ErrorResponse, GenerationParams, ModelKind, SummarizeRequest, SummarizeResponse};

pub type Result<T> = std::result::Result<T, Error>;
