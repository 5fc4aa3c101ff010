//! Consumable endpoints. Consumables are shared, so any caller may edit or delete one.

use super::{
    AppState,
    extract::{IdPath, JsonBody, MaybeUser, QueryParams},
    payload::{ConsumablePayload, ConsumableQuery},
};
use crate::{core::consumable, entities, errors::Result};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::info;

/// `GET /api/consumables[?house_id=]` - newest first.
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ConsumableQuery>,
) -> Result<Json<Vec<entities::consumable::Model>>> {
    consumable::list_consumables(&state.db, query.house_id)
        .await
        .map(Json)
}

/// `POST /api/consumables` - owned by the caller's house when `x-user-id` is sent.
pub async fn create(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    JsonBody(payload): JsonBody<ConsumablePayload>,
) -> Result<(StatusCode, Json<entities::consumable::Model>)> {
    let house_id = user.and_then(|u| u.house_id);
    let created = consumable::create_consumable(&state.db, payload.into_input()?, house_id).await?;
    info!("Created consumable {} '{}'", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/consumables/:id`
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<ConsumablePayload>,
) -> Result<Json<entities::consumable::Model>> {
    consumable::update_consumable(&state.db, id, payload.into_input()?)
        .await
        .map(Json)
}

/// `DELETE /api/consumables/:id` - entries logged from it are kept.
pub async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> Result<Json<Value>> {
    consumable::delete_consumable(&state.db, id).await?;
    info!("Deleted consumable {}", id);
    Ok(Json(json!({ "success": true })))
}
