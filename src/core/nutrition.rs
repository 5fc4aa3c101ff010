//! Macro arithmetic and aggregation of food entries.
//!
//! [`Macros`] is the four-number bundle (calories, protein, carbs, fat) used for entry
//! snapshots, daily totals, goal targets, and remaining amounts alike.

use crate::{
    core::{food_entry, require_non_negative, require_positive},
    entities::{consumable, daily_goal},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// Calories plus protein, carbohydrate, and fat grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    /// Calories (kcal)
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

impl Macros {
    /// Creates a new macro bundle.
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Multiplies every value by `ratio`.
    #[must_use]
    pub fn scaled(self, ratio: f64) -> Self {
        Self::new(
            self.calories * ratio,
            self.protein * ratio,
            self.carbs * ratio,
            self.fat * ratio,
        )
    }

    /// Checks that every value is finite and non-negative.
    pub fn validate(self) -> Result<Self> {
        require_non_negative("calories", self.calories)?;
        require_non_negative("protein", self.protein)?;
        require_non_negative("carbs", self.carbs)?;
        require_non_negative("fat", self.fat)?;
        Ok(self)
    }
}

impl Add for Macros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.calories + rhs.calories,
            self.protein + rhs.protein,
            self.carbs + rhs.carbs,
            self.fat + rhs.fat,
        )
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Macros {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.calories - rhs.calories,
            self.protein - rhs.protein,
            self.carbs - rhs.carbs,
            self.fat - rhs.fat,
        )
    }
}

impl From<&crate::entities::food_entry::Model> for Macros {
    fn from(entry: &crate::entities::food_entry::Model) -> Self {
        Self::new(entry.calories, entry.protein, entry.carbs, entry.fat)
    }
}

impl From<&daily_goal::Model> for Macros {
    fn from(goal: &daily_goal::Model) -> Self {
        Self::new(goal.calories, goal.protein, goal.carbs, goal.fat)
    }
}

impl From<&consumable::Model> for Macros {
    fn from(consumable: &consumable::Model) -> Self {
        Self::new(
            consumable.calories,
            consumable.protein,
            consumable.carbs,
            consumable.fat,
        )
    }
}

/// Sums the macro values of `entries`. An empty input yields all zeros.
pub fn aggregate<'a, I>(entries: I) -> Macros
where
    I: IntoIterator<Item = &'a crate::entities::food_entry::Model>,
{
    entries
        .into_iter()
        .fold(Macros::default(), |acc, entry| acc + Macros::from(entry))
}

/// Computes the macros of `grams` of `consumable`, whose values are per serving.
///
/// # Errors
/// Returns a validation error if `grams` is negative or not finite, or if the
/// consumable's serving size is not positive.
pub fn scale_consumable(consumable: &consumable::Model, grams: f64) -> Result<Macros> {
    let grams = require_non_negative("amount", grams)?;
    let serving_size = require_positive("serving_size", consumable.serving_size)?;
    Ok(Macros::from(consumable).scaled(grams / serving_size))
}

/// Loads `user_id`'s entries for `date` and returns their totals.
pub async fn daily_totals(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
) -> Result<Macros> {
    let entries = food_entry::list_entries_for_date(db, user_id, date).await?;
    Ok(aggregate(&entries))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::food_entry::Model as FoodEntryModel;
    use crate::test_utils::*;

    #[test]
    fn test_aggregate_empty_is_zero() {
        let entries: Vec<FoodEntryModel> = Vec::new();
        assert_eq!(aggregate(&entries), Macros::default());
    }

    #[test]
    fn test_aggregate_sums_each_macro() {
        let entries = vec![
            entry_model(1, Macros::new(200.0, 10.0, 20.0, 5.0)),
            entry_model(1, Macros::new(350.0, 25.0, 30.0, 12.5)),
            entry_model(1, Macros::new(50.0, 0.0, 12.0, 0.0)),
        ];

        let totals = aggregate(&entries);
        assert_eq!(totals, Macros::new(600.0, 35.0, 62.0, 17.5));
    }

    #[test]
    fn test_scale_consumable_by_grams() {
        let oats = consumable_model("Oats", Macros::new(150.0, 5.0, 27.0, 3.0), 40.0);

        let macros = scale_consumable(&oats, 80.0).unwrap_or_default();
        assert_eq!(macros, Macros::new(300.0, 10.0, 54.0, 6.0));
    }

    #[test]
    fn test_scale_consumable_rejects_bad_input() {
        let oats = consumable_model("Oats", Macros::new(150.0, 5.0, 27.0, 3.0), 40.0);
        assert!(scale_consumable(&oats, -1.0).is_err());

        let broken = consumable_model("Broken", Macros::new(150.0, 5.0, 27.0, 3.0), 0.0);
        assert!(scale_consumable(&broken, 10.0).is_err());
    }

    #[test]
    fn test_macros_validate() {
        assert!(Macros::new(1.0, 2.0, 3.0, 4.0).validate().is_ok());
        assert!(Macros::new(1.0, -2.0, 3.0, 4.0).validate().is_err());
        assert!(Macros::new(f64::NAN, 2.0, 3.0, 4.0).validate().is_err());
    }

    #[test]
    fn test_macros_subtraction() {
        let goal = Macros::new(2000.0, 150.0, 200.0, 70.0);
        let eaten = Macros::new(2100.0, 100.0, 50.0, 70.0);
        assert_eq!(goal - eaten, Macros::new(-100.0, 50.0, 150.0, 0.0));
    }

    #[tokio::test]
    async fn test_daily_totals_only_counts_that_user_and_day() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        let other = create_test_user(&db, "Other").await?;

        log_manual_entry(&db, user.id, day(1), "Eggs", Macros::new(140.0, 12.0, 1.0, 10.0))
            .await?;
        log_manual_entry(&db, user.id, day(1), "Toast", Macros::new(80.0, 3.0, 15.0, 1.0))
            .await?;
        log_manual_entry(&db, user.id, day(2), "Pizza", Macros::new(800.0, 30.0, 90.0, 35.0))
            .await?;
        log_manual_entry(&db, other.id, day(1), "Salad", Macros::new(120.0, 4.0, 10.0, 7.0))
            .await?;

        let totals = daily_totals(&db, user.id, day(1)).await?;
        assert_eq!(totals, Macros::new(220.0, 15.0, 16.0, 11.0));

        let empty = daily_totals(&db, user.id, day(3)).await?;
        assert_eq!(empty, Macros::default());

        Ok(())
    }
}
