//! Feature schema handler

use axum::{extract::State, Json};
use serde::Serialize;

use churn_core::{FeatureSchema, LayoutInfo};

use crate::AppState;

#[derive(Serialize)]
pub struct SchemaResponse {
    layout: LayoutInfo,
    schema: FeatureSchema,
}

/// Attribute definitions, for building input forms
pub async fn get(State(state): State<AppState>) -> Json<SchemaResponse> {
    let schema = state
        .evaluator
        .as_ref()
        .map(|e| e.schema().clone())
        .unwrap_or_else(FeatureSchema::churn_v1);

    Json(SchemaResponse {
        layout: schema.layout_info(),
        schema,
    })
}
