//! Shared test utilities for `MacroBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        consumable::{self, ConsumableInput},
        food_entry::{self, AmountUnit, EntrySource, NewFoodEntry},
        nutrition::Macros,
        user,
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A day in January 2025. Tests only care about ordering between days.
#[must_use]
pub fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, n).unwrap_or_default()
}

/// Creates a test user without a house.
pub async fn create_test_user(db: &DatabaseConnection, name: &str) -> Result<entities::user::Model> {
    user::find_or_create_user(db, name, None).await
}

/// Sets up a complete test environment with one user.
/// Returns (db, user) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "Test User").await?;
    Ok((db, user))
}

/// Creates a shared consumable with the given per-serving macros.
pub async fn create_test_consumable(
    db: &DatabaseConnection,
    name: &str,
    macros: Macros,
    serving_size: f64,
) -> Result<entities::consumable::Model> {
    consumable::create_consumable(
        db,
        ConsumableInput {
            name: name.to_string(),
            macros,
            serving_size,
        },
        None,
    )
    .await
}

/// Logs a manual entry of 100 g with the given macros.
pub async fn log_manual_entry(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
    name: &str,
    macros: Macros,
) -> Result<entities::food_entry::Model> {
    food_entry::create_food_entry(
        db,
        user_id,
        NewFoodEntry {
            date,
            amount: 100.0,
            source: EntrySource::Manual {
                name: name.to_string(),
                macros,
            },
            description: None,
            image_url: None,
        },
    )
    .await
}

/// Logs `grams` of a stored consumable.
pub async fn log_consumable_entry(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
    consumable_id: i64,
    grams: f64,
) -> Result<entities::food_entry::Model> {
    food_entry::create_food_entry(
        db,
        user_id,
        NewFoodEntry {
            date,
            amount: grams,
            source: EntrySource::Consumable {
                consumable_id,
                unit: AmountUnit::Grams,
            },
            description: None,
            image_url: None,
        },
    )
    .await
}

/// Builds an unsaved consumable model.
#[must_use]
pub fn consumable_model(
    name: &str,
    macros: Macros,
    serving_size: f64,
) -> entities::consumable::Model {
    let now = chrono::Utc::now();
    entities::consumable::Model {
        id: 0,
        name: name.to_string(),
        calories: macros.calories,
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
        serving_size,
        house_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// Builds an unsaved user model.
#[must_use]
pub fn user_model(id: i64, name: &str) -> entities::user::Model {
    entities::user::Model {
        id,
        name: name.to_string(),
        house_id: None,
    }
}

/// Builds an unsaved 100 g food entry model for `user_id` on day 1.
#[must_use]
pub fn entry_model(user_id: i64, macros: Macros) -> entities::food_entry::Model {
    entities::food_entry::Model {
        id: 0,
        user_id,
        date: day(1),
        amount: 100.0,
        consumable_id: None,
        name: "Test food".to_string(),
        calories: macros.calories,
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
        description: None,
        image_url: None,
        created_at: chrono::Utc::now(),
    }
}
