//! Database configuration module for `MacroBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. The one constraint entities cannot
//! express, the composite unique key on daily goals, is added here as an index.

use crate::entities::{Consumable, DailyGoal, FoodEntry, House, User, daily_goal};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;

/// Default database location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/macro_buddy.sqlite?mode=rwc";

/// Name of the unique index enforcing one goal per user per day.
pub const DAILY_GOAL_UNIQUE_INDEX: &str = "idx_daily_goals_user_date";

/// Establishes a connection to the database at `database_url`.
///
/// For a file-backed `SQLite` URL the parent directory is created first, so the default
/// `data/` location works on a fresh checkout.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url)
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    Database::connect(database_url).await.map_err(Into::into)
}

/// The file path of a `sqlite:` URL, or None for in-memory and non-SQLite URLs.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(Path::new(path))
}

/// Creates all tables (if missing) using `SeaORM`'s schema generation from entity definitions.
///
/// Tables are created parents first so foreign keys resolve: houses, users, consumables,
/// food entries, daily goals. Safe to call on every start-up.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, House).await?;
    create_table(db, &schema, User).await?;
    create_table(db, &schema, Consumable).await?;
    create_table(db, &schema, FoodEntry).await?;
    create_table(db, &schema, DailyGoal).await?;

    let unique_goal = Index::create()
        .name(DAILY_GOAL_UNIQUE_INDEX)
        .table(DailyGoal)
        .col(daily_goal::Column::UserId)
        .col(daily_goal::Column::Date)
        .unique()
        .if_not_exists()
        .to_owned();
    let builder = db.get_database_backend();
    db.execute(builder.build(&unique_goal)).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        consumable::Model as ConsumableModel, daily_goal::Model as DailyGoalModel,
        food_entry::Model as FoodEntryModel, house::Model as HouseModel,
        user::Model as UserModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<HouseModel> = House::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<ConsumableModel> = Consumable::find().limit(1).all(&db).await?;
        let _: Vec<FoodEntryModel> = FoodEntry::find().limit(1).all(&db).await?;
        let _: Vec<DailyGoalModel> = DailyGoal::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path(DEFAULT_DATABASE_URL),
            Some(Path::new("data/macro_buddy.sqlite"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:/var/lib/macros.db"),
            Some(Path::new("/var/lib/macros.db"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/macros"), None);
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
