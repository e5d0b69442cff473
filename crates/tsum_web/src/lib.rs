use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/summarize", post(handlers::summarize))
        .route("/health", get(handlers::health))
        .route("/models", get(handlers::models))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use tsum_core::{Error, Result, SummarizeRequest, SummarizeResponse};
}
