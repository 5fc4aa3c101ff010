use super::{
    AppState,
    extract::{CurrentUser, JsonBody, QueryParams},
    payload::{DateQuery, GoalPayload, parse_date},
};
use crate::{core::goal, entities, errors::Result};
use axum::{
    Json,
    extract::State,
};
use tracing::info;

/// `GET /api/daily-goal?date=` - the goal in effect, carried forward and stored if the
/// day had none. `null` when the caller has never set a goal on or before `date`.
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<DateQuery>,
) -> Result<Json<Option<entities::daily_goal::Model>>> {
    let date = parse_date(query.date.as_deref())?;
    goal::resolve_goal(&state.db, user.id, date).await.map(Json)
}

/// `POST /api/daily-goal` - sets the goal for a day, replacing any existing one.
pub async fn set(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(payload): JsonBody<GoalPayload>,
) -> Result<Json<entities::daily_goal::Model>> {
    let (date, targets) = payload.into_parts()?;
    let saved = goal::upsert_goal(&state.db, user.id, date, targets).await?;
    info!(user_id = user.id, "Set goal of {} kcal for {}", saved.calories, date);
    Ok(Json(saved))
}
