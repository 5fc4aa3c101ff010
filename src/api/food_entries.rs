//! Food entry endpoints. Every operation is scoped to the caller.

use super::{
    AppState,
    extract::{CurrentUser, IdPath, JsonBody, QueryParams},
    payload::{DateQuery, FoodEntryPayload, parse_date},
};
use crate::{
    core::food_entry::{self, FoodEntryWithConsumable},
    entities,
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::info;

/// `GET /api/food-entries?date=` - the caller's entries, newest first, with their consumable.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<DateQuery>,
) -> Result<Json<Vec<FoodEntryWithConsumable>>> {
    let date = parse_date(query.date.as_deref())?;
    food_entry::list_entries_with_consumable(&state.db, user.id, date)
        .await
        .map(Json)
}

/// `POST /api/food-entries`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(payload): JsonBody<FoodEntryPayload>,
) -> Result<(StatusCode, Json<entities::food_entry::Model>)> {
    let entry = food_entry::create_food_entry(&state.db, user.id, payload.into_new_entry()?).await?;
    info!(
        user_id = user.id,
        "Logged '{}' ({} kcal) for {}", entry.name, entry.calories, entry.date
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `DELETE /api/food-entries/:id` - 404 unless the entry belongs to the caller.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
) -> Result<Json<Value>> {
    food_entry::delete_food_entry(&state.db, user.id, id).await?;
    Ok(Json(json!({ "success": true })))
}
