//! User and house business logic - lookups and seeding.
//!
//! Users are never created or edited through the HTTP API. They come from the seed file,
//! and seeding is find-or-create by name so existing rows are left alone.

use crate::{
    config::seed::SeedConfig,
    entities::{House, User, house, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all users, ordered alphabetically by name.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific user by its unique ID.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Retrieves a user by ID, failing with [`Error::UserNotFound`] if there is none.
pub async fn require_user(db: &DatabaseConnection, user_id: i64) -> Result<user::Model> {
    get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: user_id.to_string(),
        })
}

/// Returns the house called `name`, creating it if needed.
pub async fn find_or_create_house(db: &DatabaseConnection, name: &str) -> Result<house::Model> {
    let name = crate::core::require_name("name", name)?;

    if let Some(existing) = House::find()
        .filter(house::Column::Name.eq(name.as_str()))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let house = house::ActiveModel {
        name: Set(name),
        ..Default::default()
    };
    house.insert(db).await.map_err(Into::into)
}

/// Returns the user called `name`, creating it in `house_id` if needed.
///
/// An existing user is returned unchanged, even if `house_id` differs.
pub async fn find_or_create_user(
    db: &DatabaseConnection,
    name: &str,
    house_id: Option<i64>,
) -> Result<user::Model> {
    let name = crate::core::require_name("name", name)?;

    if let Some(existing) = User::find()
        .filter(user::Column::Name.eq(name.as_str()))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let user = user::ActiveModel {
        name: Set(name),
        house_id: Set(house_id),
        ..Default::default()
    };
    user.insert(db).await.map_err(Into::into)
}

/// Creates the houses and users listed in `config` that do not exist yet.
///
/// A user may name a house that is not listed under `houses`; it is created as well.
/// Returns the number of users in the configuration.
pub async fn seed_from_config(db: &DatabaseConnection, config: &SeedConfig) -> Result<usize> {
    for house in &config.houses {
        find_or_create_house(db, &house.name).await?;
    }

    for user in &config.users {
        let house_id = match &user.house {
            Some(house_name) => Some(find_or_create_house(db, house_name).await?.id),
            None => None,
        };
        find_or_create_user(db, &user.name, house_id).await?;
    }

    info!(
        houses = config.houses.len(),
        users = config.users.len(),
        "Seed data applied"
    );
    Ok(config.users.len())
}
