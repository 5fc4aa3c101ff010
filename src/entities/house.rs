//! House entity - A household that groups users together.
//! Users in the same house share consumables and appear on the same leaderboard.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// House database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "houses")]
pub struct Model {
    /// Unique identifier for the house
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the household, unique across houses
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between House and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One house has many users
    #[sea_orm(has_many = "super::user::Entity")]
    Users,
    /// One house owns many consumables
    #[sea_orm(has_many = "super::consumable::Entity")]
    Consumables,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::consumable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
