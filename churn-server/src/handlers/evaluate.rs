//! Evaluation handler

use axum::{extract::State, Json};
use chrono::Utc;
use uuid::Uuid;

use churn_core::RawProfile;

use crate::{AppState, AppError, AppResult};
use crate::models::EvaluationResponse;

/// Score one employee profile
pub async fn evaluate(
    State(state): State<AppState>,
    Json(profile): Json<RawProfile>,
) -> AppResult<Json<EvaluationResponse>> {
    let evaluator = state.evaluator.as_ref().ok_or(AppError::ModelUnavailable)?;
    let request_id = Uuid::new_v4();

    let evaluation = evaluator.evaluate_raw(profile).map_err(|e| {
        tracing::warn!("Evaluation {} rejected: {}", request_id, e);
        AppError::from(e)
    })?;

    tracing::info!(
        "Evaluation {}: {} ({})",
        request_id,
        evaluation.decision,
        evaluation.probability_label()
    );

    Ok(Json(EvaluationResponse::new(request_id, &evaluation, Utc::now())))
}
