use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;

use tsum_core::{Error, ErrorResponse, ModelKind, SummarizeRequest, SummarizeResponse};

use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map orchestrator errors to a status code plus the `{"error": ...}` payload.
/// Request-shaped problems are 422; model-runtime failures surface as 500.
fn into_api_error(err: Error) -> ApiError {
    let status = match err {
        Error::EmptyInput | Error::Validation(_) | Error::UnknownModel(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => {
            error!("Summarization failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let summary = state
        .summarizer
        .summarize(&req)
        .await
        .map_err(into_api_error)?;
    Ok(Json(SummarizeResponse { summary }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub pretrained: &'static str,
    pub task_prefix: Option<&'static str>,
    pub default: bool,
    pub loaded: bool,
}

pub async fn models(State(state): State<Arc<AppState>>) -> Json<Vec<ModelInfo>> {
    let loaded = state.registry.loaded().await;
    let infos = ModelKind::ALL
        .iter()
        .map(|kind| ModelInfo {
            name: kind.name(),
            pretrained: kind.pretrained(),
            task_prefix: kind.task_prefix(),
            default: *kind == ModelKind::DEFAULT,
            loaded: loaded.contains(kind),
        })
        .collect();
    Json(infos)
}
