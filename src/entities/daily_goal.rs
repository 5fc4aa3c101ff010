//! Daily goal entity - A user's macro targets for one calendar day.
//!
//! At most one row exists per (`user_id`, `date`); the unique index is created
//! alongside the table in [`crate::config::database::create_tables`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily goal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_goals")]
pub struct Model {
    /// Unique identifier for the goal
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User the goal belongs to
    pub user_id: i64,
    /// Day the goal applies to
    pub date: Date,
    /// Target calories
    pub calories: f64,
    /// Target protein grams
    pub protein: f64,
    /// Target carbohydrate grams
    pub carbs: f64,
    /// Target fat grams
    pub fat: f64,
    /// When the row was first written
    pub created_at: DateTimeUtc,
    /// When the targets were last overwritten
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `DailyGoal` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each goal belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
