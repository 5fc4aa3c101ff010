//! Food entry entity - One logged intake event.
//!
//! Each entry has a `user_id`, a calendar `date`, the `amount` eaten in grams, and a
//! snapshot of the name and macro values taken when it was logged. The optional
//! `consumable_id` links back to the food definition it came from; it is cleared,
//! not cascaded, when that consumable is deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Food entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who ate the food
    pub user_id: i64,
    /// Calendar day the food was eaten
    pub date: Date,
    /// Amount eaten in grams
    pub amount: f64,
    /// Consumable this entry was logged from, if any
    pub consumable_id: Option<i64>,
    /// Food name at logging time
    pub name: String,
    /// Calories consumed
    pub calories: f64,
    /// Protein grams consumed
    pub protein: f64,
    /// Carbohydrate grams consumed
    pub carbs: f64,
    /// Fat grams consumed
    pub fat: f64,
    /// Optional free-text note
    pub description: Option<String>,
    /// Optional link to a photo of the meal
    pub image_url: Option<String>,
    /// When the entry was logged
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `FoodEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Each entry optionally references the consumable it was logged from
    #[sea_orm(
        belongs_to = "super::consumable::Entity",
        from = "Column::ConsumableId",
        to = "super::consumable::Column::Id",
        on_delete = "SetNull"
    )]
    Consumable,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::consumable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumable.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
