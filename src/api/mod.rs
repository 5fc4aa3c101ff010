//! # HTTP API
//!
//! JSON endpoints under `/api`. The caller identifies themselves with the `x-user-id`
//! header; there is no session and no authentication.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/api/health` | liveness |
//! | GET | `/api/users` | [`users::list`] |
//! | GET, POST | `/api/consumables` | [`consumables::list`], [`consumables::create`] |
//! | PUT, DELETE | `/api/consumables/:id` | [`consumables::update`], [`consumables::remove`] |
//! | GET, POST | `/api/food-entries` | [`food_entries::list`], [`food_entries::create`] |
//! | DELETE | `/api/food-entries/:id` | [`food_entries::remove`] |
//! | GET, POST | `/api/daily-goal` | [`goals::get`], [`goals::set`] |
//! | GET | `/api/summary` | [`progress::summary`] |
//! | GET | `/api/leaderboard` | [`progress::leaderboard`] |
//! | POST | `/api/analyze-food` | [`analyze::food`] |
//! | POST | `/api/analyze-label` | [`analyze::label`] |

/// Nutrition estimate endpoints
pub mod analyze;
/// Consumable CRUD endpoints
pub mod consumables;
/// Request extractors for the caller and JSON bodies
pub mod extract;
/// Food entry endpoints
pub mod food_entries;
/// Daily goal endpoints
pub mod goals;
/// Request bodies and query strings
pub mod payload;
/// Summary and leaderboard endpoints
pub mod progress;
/// Error to HTTP response mapping
pub mod response;
/// User listing endpoint
pub mod users;


use crate::ai::NutritionEstimator;
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Nutrition estimator backed by the configured vision model
    pub estimator: Arc<NutritionEstimator>,
}

/// Builds the application router. Request bodies larger than `max_body_bytes` are
/// rejected before reaching a handler.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/users", get(users::list))
        .route("/consumables", get(consumables::list).post(consumables::create))
        .route(
            "/consumables/:id",
            put(consumables::update).delete(consumables::remove),
        )
        .route(
            "/food-entries",
            get(food_entries::list).post(food_entries::create),
        )
        .route("/food-entries/:id", delete(food_entries::remove))
        .route("/daily-goal", get(goals::get).post(goals::set))
        .route("/summary", get(progress::summary))
        .route("/leaderboard", get(progress::leaderboard))
        .route("/analyze-food", post(analyze::food))
        .route("/analyze-label", post(analyze::label));

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
