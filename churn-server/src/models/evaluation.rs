//! Evaluation model

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use churn_core::{Decision, Evaluation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub request_id: Uuid,
    pub probability: f64,
    pub probability_label: String,
    pub decision: Decision,
    pub headline: String,
    pub threshold: f64,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationResponse {
    pub fn new(request_id: Uuid, evaluation: &Evaluation, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            request_id,
            probability: evaluation.score.value(),
            probability_label: evaluation.probability_label(),
            decision: evaluation.decision,
            headline: evaluation.headline().to_string(),
            threshold: evaluation.threshold,
            evaluated_at,
        }
    }
}
