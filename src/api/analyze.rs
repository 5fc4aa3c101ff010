//! Nutrition estimate endpoints. Nothing is stored; the client shows the estimate for
//! the user to confirm before logging it.

use super::{AppState, extract::JsonBody, payload::AnalyzePayload};
use crate::{ai::NutritionEstimate, errors::Result};
use axum::{Json, extract::State};

/// `POST /api/analyze-food` - `{image_base64?, description?}`, at least one required.
pub async fn food(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AnalyzePayload>,
) -> Result<Json<NutritionEstimate>> {
    state
        .estimator
        .estimate_food(payload.image_base64.as_deref(), payload.description.as_deref())
        .await
        .map(Json)
}

/// `POST /api/analyze-label` - `{image_base64}` of a printed nutrition label.
pub async fn label(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AnalyzePayload>,
) -> Result<Json<NutritionEstimate>> {
    state
        .estimator
        .read_label(payload.image_base64.as_deref())
        .await
        .map(Json)
}
