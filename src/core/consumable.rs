//! Consumable business logic - Handles the shared food database.
//!
//! Consumables are reusable food definitions with macro values per serving. They can be
//! created, edited, and deleted freely: food entries keep their own copy of the values,
//! and deleting a consumable only detaches the entries that were logged from it.

use crate::{
    core::{nutrition::Macros, require_name, require_positive},
    entities::{Consumable, FoodEntry, consumable, food_entry},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};

/// Validated fields of a consumable, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumableInput {
    /// Name of the food
    pub name: String,
    /// Macros per serving
    pub macros: Macros,
    /// Serving size in grams
    pub serving_size: f64,
}

impl ConsumableInput {
    fn validate(self) -> Result<Self> {
        Ok(Self {
            name: require_name("name", &self.name)?,
            macros: self.macros.validate()?,
            serving_size: require_positive("serving_size", self.serving_size)?,
        })
    }
}

/// Retrieves consumables, newest first.
///
/// With `house_id`, only that house's consumables and the shared ones (no house) are
/// returned; without it, every consumable is.
pub async fn list_consumables(
    db: &DatabaseConnection,
    house_id: Option<i64>,
) -> Result<Vec<consumable::Model>> {
    let mut query = Consumable::find();
    if let Some(house_id) = house_id {
        query = query.filter(
            Condition::any()
                .add(consumable::Column::HouseId.eq(house_id))
                .add(consumable::Column::HouseId.is_null()),
        );
    }

    query
        .order_by_desc(consumable::Column::CreatedAt)
        .order_by_desc(consumable::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific consumable by its unique ID.
pub async fn get_consumable_by_id(
    db: &DatabaseConnection,
    consumable_id: i64,
) -> Result<Option<consumable::Model>> {
    Consumable::find_by_id(consumable_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new consumable owned by `house_id`, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - Any macro value is negative or not finite
/// - The serving size is not a positive number
/// - The database insert operation fails
pub async fn create_consumable(
    db: &DatabaseConnection,
    input: ConsumableInput,
    house_id: Option<i64>,
) -> Result<consumable::Model> {
    let input = input.validate()?;
    let now = chrono::Utc::now();

    let consumable = consumable::ActiveModel {
        name: Set(input.name),
        calories: Set(input.macros.calories),
        protein: Set(input.macros.protein),
        carbs: Set(input.macros.carbs),
        fat: Set(input.macros.fat),
        serving_size: Set(input.serving_size),
        house_id: Set(house_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    consumable.insert(db).await.map_err(Into::into)
}

/// Replaces the name, macros, and serving size of an existing consumable.
///
/// Entries already logged from this consumable keep their original values.
///
/// # Errors
/// Returns an error if validation fails, the consumable does not exist, or the
/// database update operation fails.
pub async fn update_consumable(
    db: &DatabaseConnection,
    consumable_id: i64,
    input: ConsumableInput,
) -> Result<consumable::Model> {
    let input = input.validate()?;

    let mut consumable: consumable::ActiveModel = Consumable::find_by_id(consumable_id)
        .one(db)
        .await?
        .ok_or(Error::ConsumableNotFound { id: consumable_id })?
        .into();

    consumable.name = Set(input.name);
    consumable.calories = Set(input.macros.calories);
    consumable.protein = Set(input.macros.protein);
    consumable.carbs = Set(input.macros.carbs);
    consumable.fat = Set(input.macros.fat);
    consumable.serving_size = Set(input.serving_size);
    consumable.updated_at = Set(chrono::Utc::now());

    consumable.update(db).await.map_err(Into::into)
}

/// Deletes a consumable and detaches every entry that referenced it.
///
/// # Errors
/// Returns [`Error::ConsumableNotFound`] if the consumable does not exist.
pub async fn delete_consumable(db: &DatabaseConnection, consumable_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let consumable = Consumable::find_by_id(consumable_id)
        .one(&txn)
        .await?
        .ok_or(Error::ConsumableNotFound { id: consumable_id })?;

    FoodEntry::update_many()
        .col_expr(
            food_entry::Column::ConsumableId,
            Expr::value(Option::<i64>::None),
        )
        .filter(food_entry::Column::ConsumableId.eq(consumable.id))
        .exec(&txn)
        .await?;

    consumable.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
