//! Food entry business logic - Handles logging, listing, and deleting intake events.
//!
//! An entry is either entered manually (name and macros typed in, or taken from an AI
//! estimate) or logged from a consumable. In the second case the consumable's per-serving
//! values are scaled to the amount eaten and copied into the entry, so later edits to the
//! consumable leave the entry untouched. Entries are never updated after creation.

use crate::{
    core::{
        consumable,
        nutrition::{Macros, scale_consumable},
        require_name, require_non_negative,
    },
    entities::{Consumable, FoodEntry, consumable as consumable_entity, food_entry},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Unit of the `amount` given when logging from a consumable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    /// Amount is a weight in grams
    #[default]
    Grams,
    /// Amount is a number of servings of the consumable
    Servings,
}

/// Where the name and macro values of a new entry come from.
#[derive(Debug, Clone, PartialEq)]
pub enum EntrySource {
    /// Values supplied directly by the caller
    Manual {
        /// Food name
        name: String,
        /// Macros for the whole amount eaten
        macros: Macros,
    },
    /// Values derived from a stored consumable
    Consumable {
        /// Consumable to log
        consumable_id: i64,
        /// How `amount` should be interpreted
        unit: AmountUnit,
    },
}

/// Everything needed to log a food entry for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodEntry {
    /// Day the food was eaten
    pub date: NaiveDate,
    /// Amount eaten, in grams or servings depending on the source
    pub amount: f64,
    /// Name and macro source
    pub source: EntrySource,
    /// Optional free-text note
    pub description: Option<String>,
    /// Optional photo link
    pub image_url: Option<String>,
}

/// A food entry together with the consumable it was logged from, if that still exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodEntryWithConsumable {
    /// The stored entry
    #[serde(flatten)]
    pub entry: food_entry::Model,
    /// Current state of the linked consumable
    pub consumable: Option<consumable_entity::Model>,
}

/// Logs a new food entry for `user_id`, snapshotting its name and macro values.
///
/// # Errors
/// Returns an error if:
/// - The amount is negative or not finite
/// - A manual entry has an empty name or invalid macros
/// - The referenced consumable does not exist
/// - The database insert operation fails
pub async fn create_food_entry(
    db: &DatabaseConnection,
    user_id: i64,
    new_entry: NewFoodEntry,
) -> Result<food_entry::Model> {
    let amount = require_non_negative("amount", new_entry.amount)?;

    let (consumable_id, name, grams, macros) = match new_entry.source {
        EntrySource::Manual { name, macros } => {
            (None, require_name("name", &name)?, amount, macros.validate()?)
        }
        EntrySource::Consumable {
            consumable_id,
            unit,
        } => {
            let consumable = consumable::get_consumable_by_id(db, consumable_id)
                .await?
                .ok_or(Error::ConsumableNotFound { id: consumable_id })?;
            let grams = match unit {
                AmountUnit::Grams => amount,
                AmountUnit::Servings => amount * consumable.serving_size,
            };
            let macros = scale_consumable(&consumable, grams)?;
            (Some(consumable.id), consumable.name, grams, macros)
        }
    };

    let entry = food_entry::ActiveModel {
        user_id: Set(user_id),
        date: Set(new_entry.date),
        amount: Set(grams),
        consumable_id: Set(consumable_id),
        name: Set(name),
        calories: Set(macros.calories),
        protein: Set(macros.protein),
        carbs: Set(macros.carbs),
        fat: Set(macros.fat),
        description: Set(non_blank(new_entry.description)),
        image_url: Set(non_blank(new_entry.image_url)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    entry.insert(db).await.map_err(Into::into)
}

/// Retrieves `user_id`'s entries for `date`, newest first.
pub async fn list_entries_for_date(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<Vec<food_entry::Model>> {
    FoodEntry::find()
        .filter(food_entry::Column::UserId.eq(user_id))
        .filter(food_entry::Column::Date.eq(date))
        .order_by_desc(food_entry::Column::CreatedAt)
        .order_by_desc(food_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves `user_id`'s entries for `date` with their linked consumables, newest first.
pub async fn list_entries_with_consumable(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<Vec<FoodEntryWithConsumable>> {
    let rows = FoodEntry::find()
        .find_also_related(Consumable)
        .filter(food_entry::Column::UserId.eq(user_id))
        .filter(food_entry::Column::Date.eq(date))
        .order_by_desc(food_entry::Column::CreatedAt)
        .order_by_desc(food_entry::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(entry, consumable)| FoodEntryWithConsumable { entry, consumable })
        .collect())
}

/// Finds an entry by id, only if it belongs to `user_id`.
pub async fn get_food_entry_for_user(
    db: &DatabaseConnection,
    user_id: i64,
    entry_id: i64,
) -> Result<Option<food_entry::Model>> {
    FoodEntry::find_by_id(entry_id)
        .filter(food_entry::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes one of `user_id`'s entries. Other entries and consumables are untouched.
///
/// # Errors
/// Returns [`Error::FoodEntryNotFound`] if the entry does not exist or belongs to
/// another user.
pub async fn delete_food_entry(db: &DatabaseConnection, user_id: i64, entry_id: i64) -> Result<()> {
    let result = FoodEntry::delete_many()
        .filter(food_entry::Column::Id.eq(entry_id))
        .filter(food_entry::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::FoodEntryNotFound { id: entry_id });
    }

    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
