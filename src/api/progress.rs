use super::{
    AppState,
    extract::{CurrentUser, QueryParams},
    payload::{DateQuery, LeaderboardQuery, parse_date},
};
use crate::{
    core::{
        leaderboard::{self, LeaderboardEntry},
        summary::{self, DailySummary},
    },
    errors::Result,
};
use axum::{
    Json,
    extract::State,
};

/// `GET /api/summary?date=` - the caller's totals against their goal.
pub async fn summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<DateQuery>,
) -> Result<Json<DailySummary>> {
    let date = parse_date(query.date.as_deref())?;
    summary::daily_summary(&state.db, user.id, date).await.map(Json)
}

/// `GET /api/leaderboard?date=[&house_id=]` - best average completion first.
pub async fn leaderboard(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let date = parse_date(query.date.as_deref())?;
    leaderboard::build_leaderboard(&state.db, date, query.house_id)
        .await
        .map(Json)
}
