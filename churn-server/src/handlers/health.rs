//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use churn_core::EngineStatus;
use churn_core::logic::pipeline;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    timestamp: i64,
    engine: EngineStatus,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, engine) = match &state.evaluator {
        Some(evaluator) => ("healthy", evaluator.status()),
        None => ("degraded", pipeline::status()),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
        engine,
    })
}
