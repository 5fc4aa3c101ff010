//! User entity - A person who logs food and sets goals.
//!
//! Users are created by seeding from `config.toml` and are not edited afterwards.
//! The optional `house_id` places the user in a household.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user, sent by clients in the `x-user-id` header
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across users
    #[sea_orm(unique)]
    pub name: String,
    /// Household this user belongs to, if any
    pub house_id: Option<i64>,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each user optionally belongs to one house
    #[sea_orm(
        belongs_to = "super::house::Entity",
        from = "Column::HouseId",
        to = "super::house::Column::Id",
        on_delete = "SetNull"
    )]
    House,
    /// One user has many food entries
    #[sea_orm(has_many = "super::food_entry::Entity")]
    FoodEntries,
    /// One user has many daily goals
    #[sea_orm(has_many = "super::daily_goal::Entity")]
    DailyGoals,
}

impl Related<super::house::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::House.def()
    }
}

impl Related<super::food_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodEntries.def()
    }
}

impl Related<super::daily_goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyGoals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
