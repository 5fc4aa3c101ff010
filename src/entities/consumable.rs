//! Consumable entity - A reusable food definition.
//!
//! Macro values are stored per serving, with the serving size in grams. Food entries
//! copy these values at logging time, so editing a consumable never rewrites history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Consumable database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "consumables")]
pub struct Model {
    /// Unique identifier for the consumable
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the food (e.g., "Greek Yogurt")
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein grams per serving
    pub protein: f64,
    /// Carbohydrate grams per serving
    pub carbs: f64,
    /// Fat grams per serving
    pub fat: f64,
    /// Weight of one serving in grams
    pub serving_size: f64,
    /// Household that owns this consumable, None when shared by everyone
    pub house_id: Option<i64>,
    /// When the consumable was created
    pub created_at: DateTimeUtc,
    /// When the consumable was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Consumable and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each consumable optionally belongs to one house
    #[sea_orm(
        belongs_to = "super::house::Entity",
        from = "Column::HouseId",
        to = "super::house::Column::Id",
        on_delete = "SetNull"
    )]
    House,
    /// One consumable is referenced by many food entries
    #[sea_orm(has_many = "super::food_entry::Entity")]
    FoodEntries,
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

impl ActiveModelBehavior for ActiveModel {}
