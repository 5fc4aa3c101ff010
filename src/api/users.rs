use super::AppState;
use crate::{core::user, entities, errors::Result};
use axum::{Json, extract::State};

/// `GET /api/users` - every user, by name, for the user picker.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<entities::user::Model>>> {
    user::list_users(&state.db).await.map(Json)
}
