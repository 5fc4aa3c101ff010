//! Request bodies and query strings.
//!
//! Bodies come from HTML forms as often as from scripts, so every numeric field accepts
//! a JSON number or a numeric string, and every field is optional at the serde level.
//! Presence and range are checked when the payload is turned into a core input, which
//! lets a missing field be reported by name instead of as a generic decode failure.

use crate::{
    core::{
        LenientNumber,
        consumable::ConsumableInput,
        food_entry::{AmountUnit, EntrySource, NewFoodEntry},
        nutrition::Macros,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// Parses `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
pub fn parse_date(value: Option<&str>) -> Result<NaiveDate> {
    let text = value
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::validation("date", "Date is required"))?;

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .map_err(|_| Error::validation("date", format!("'{text}' is not a valid date")))
}

/// Reads a required number.
pub fn number(field: &str, value: Option<&LenientNumber>) -> Result<f64> {
    value
        .ok_or_else(|| Error::validation(field, "is required"))?
        .value()
        .ok_or_else(|| Error::validation(field, "must be a number"))
}

fn macros(
    calories: Option<&LenientNumber>,
    protein: Option<&LenientNumber>,
    carbs: Option<&LenientNumber>,
    fat: Option<&LenientNumber>,
) -> Result<Macros> {
    Ok(Macros::new(
        number("calories", calories)?,
        number("protein", protein)?,
        number("carbs", carbs)?,
        number("fat", fat)?,
    ))
}

#[allow(clippy::cast_possible_truncation)]
fn id(field: &str, value: &LenientNumber) -> Result<i64> {
    let n = value
        .value()
        .filter(|n| n.is_finite() && n.fract() == 0.0 && *n >= 1.0 && *n <= 9.0e15)
        .ok_or_else(|| Error::validation(field, "must be a positive whole number"))?;
    Ok(n as i64)
}

/// `?date=` query string.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// Day to look at
    pub date: Option<String>,
}

/// `?date=&house_id=` query string for the leaderboard.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    /// Day to rank
    pub date: Option<String>,
    /// Restrict the ranking to one house
    pub house_id: Option<i64>,
}

/// `?house_id=` query string for the consumable list.
#[derive(Debug, Default, Deserialize)]
pub struct ConsumableQuery {
    /// Show only this house's consumables plus the shared ones
    pub house_id: Option<i64>,
}

/// Body of `POST /api/consumables` and `PUT /api/consumables/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct ConsumablePayload {
    /// Food name
    pub name: Option<String>,
    /// Calories per serving
    pub calories: Option<LenientNumber>,
    /// Protein grams per serving
    pub protein: Option<LenientNumber>,
    /// Carbohydrate grams per serving
    pub carbs: Option<LenientNumber>,
    /// Fat grams per serving
    pub fat: Option<LenientNumber>,
    /// Serving size in grams
    #[serde(alias = "servingSize")]
    pub serving_size: Option<LenientNumber>,
}

impl ConsumablePayload {
    /// Checks presence and numeric form; ranges are checked by the core operation.
    pub fn into_input(self) -> Result<ConsumableInput> {
        Ok(ConsumableInput {
            name: self
                .name
                .ok_or_else(|| Error::validation("name", "is required"))?,
            macros: macros(
                self.calories.as_ref(),
                self.protein.as_ref(),
                self.carbs.as_ref(),
                self.fat.as_ref(),
            )?,
            serving_size: number("serving_size", self.serving_size.as_ref())?,
        })
    }
}

/// Body of `POST /api/food-entries`.
///
/// With `consumable_id`, the name and macros come from the consumable and `amount` is
/// read in `unit` (grams by default). Without it, `name` and all four macros are
/// required and describe the whole amount eaten.
#[derive(Debug, Default, Deserialize)]
pub struct FoodEntryPayload {
    /// Day eaten
    pub date: Option<String>,
    /// Amount eaten
    pub amount: Option<LenientNumber>,
    /// Consumable to log from
    #[serde(alias = "consumableId")]
    pub consumable_id: Option<LenientNumber>,
    /// Unit of `amount` for consumable entries
    pub unit: Option<AmountUnit>,
    /// Food name for manual entries
    pub name: Option<String>,
    /// Calories for manual entries
    pub calories: Option<LenientNumber>,
    /// Protein grams for manual entries
    pub protein: Option<LenientNumber>,
    /// Carbohydrate grams for manual entries
    pub carbs: Option<LenientNumber>,
    /// Fat grams for manual entries
    pub fat: Option<LenientNumber>,
    /// Free-text note
    pub description: Option<String>,
    /// Photo link
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl FoodEntryPayload {
    /// Resolves the entry source and checks required fields.
    pub fn into_new_entry(self) -> Result<NewFoodEntry> {
        let date = parse_date(self.date.as_deref())?;
        let amount = number("amount", self.amount.as_ref())?;

        let consumable_id = self
            .consumable_id
            .as_ref()
            .filter(|v| !matches!(v, LenientNumber::Text(t) if t.trim().is_empty()))
            .map(|v| id("consumable_id", v))
            .transpose()?;

        let source = match consumable_id {
            Some(consumable_id) => EntrySource::Consumable {
                consumable_id,
                unit: self.unit.unwrap_or_default(),
            },
            None => EntrySource::Manual {
                name: self
                    .name
                    .ok_or_else(|| Error::validation("name", "is required"))?,
                macros: macros(
                    self.calories.as_ref(),
                    self.protein.as_ref(),
                    self.carbs.as_ref(),
                    self.fat.as_ref(),
                )?,
            },
        };

        Ok(NewFoodEntry {
            date,
            amount,
            source,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

/// Body of `POST /api/daily-goal`.
#[derive(Debug, Default, Deserialize)]
pub struct GoalPayload {
    /// Day the goal applies from
    pub date: Option<String>,
    /// Calorie target
    pub calories: Option<LenientNumber>,
    /// Protein target in grams
    pub protein: Option<LenientNumber>,
    /// Carbohydrate target in grams
    pub carbs: Option<LenientNumber>,
    /// Fat target in grams
    pub fat: Option<LenientNumber>,
}

impl GoalPayload {
    /// The goal's date and targets.
    pub fn into_parts(self) -> Result<(NaiveDate, Macros)> {
        Ok((
            parse_date(self.date.as_deref())?,
            macros(
                self.calories.as_ref(),
                self.protein.as_ref(),
                self.carbs.as_ref(),
                self.fat.as_ref(),
            )?,
        ))
    }
}

/// Body of the analyze endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzePayload {
    /// Base64 image or `data:` URL
    #[serde(alias = "imageBase64", alias = "image")]
    pub image_base64: Option<String>,
    /// What the food is, in the user's words
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::panic)]
    use super::*;
    use serde_json::json;

    fn field_of(error: Error) -> String {
        match error {
            Error::Validation { field, .. } => field,
            other => panic!("expected a validation error, got {other}"),
        }
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_date(Some("2025-03-09")).unwrap(), expected);
        assert_eq!(parse_date(Some("2025-03-09T18:30:00Z")).unwrap(), expected);
        assert_eq!(parse_date(Some("2025-03-09T23:30:00-05:00")).unwrap(), expected);
    }

    #[test]
    fn test_parse_date_rejects_missing_and_garbage() {
        assert_eq!(field_of(parse_date(None).unwrap_err()), "date");
        assert_eq!(field_of(parse_date(Some("  ")).unwrap_err()), "date");
        assert_eq!(field_of(parse_date(Some("yesterday")).unwrap_err()), "date");
    }

    #[test]
    fn test_consumable_payload_accepts_strings() {
        let payload: ConsumablePayload = serde_json::from_value(json!({
            "name": "Oats",
            "calories": "389",
            "protein": 16.9,
            "carbs": "66.3",
            "fat": 6.9,
            "servingSize": "100"
        }))
        .unwrap();

        let input = payload.into_input().unwrap();
        assert_eq!(input.name, "Oats");
        assert_eq!(input.macros, Macros::new(389.0, 16.9, 66.3, 6.9));
        assert_eq!(input.serving_size, 100.0);
    }

    #[test]
    fn test_consumable_payload_names_missing_field() {
        let payload: ConsumablePayload = serde_json::from_value(json!({
            "name": "Oats", "calories": 389, "protein": "", "carbs": 66, "fat": 7, "serving_size": 100
        }))
        .unwrap();

        assert_eq!(field_of(payload.into_input().unwrap_err()), "protein");
    }

    #[test]
    fn test_food_entry_payload_from_consumable() {
        let payload: FoodEntryPayload = serde_json::from_value(json!({
            "date": "2025-01-02",
            "amount": "2",
            "consumableId": "5",
            "unit": "servings",
            "name": "ignored"
        }))
        .unwrap();

        let entry = payload.into_new_entry().unwrap();
        assert_eq!(entry.amount, 2.0);
        assert_eq!(
            entry.source,
            EntrySource::Consumable {
                consumable_id: 5,
                unit: AmountUnit::Servings
            }
        );
    }

    #[test]
    fn test_food_entry_payload_manual() {
        let payload: FoodEntryPayload = serde_json::from_value(json!({
            "date": "2025-01-02",
            "amount": 150,
            "consumable_id": "",
            "name": "Chicken curry",
            "calories": 420, "protein": 30, "carbs": 35, "fat": 18,
            "description": "from the canteen"
        }))
        .unwrap();

        let entry = payload.into_new_entry().unwrap();
        assert_eq!(
            entry.source,
            EntrySource::Manual {
                name: "Chicken curry".to_string(),
                macros: Macros::new(420.0, 30.0, 35.0, 18.0)
            }
        );
        assert_eq!(entry.description.as_deref(), Some("from the canteen"));
    }

    #[test]
    fn test_food_entry_payload_rejects_bad_consumable_id() {
        let payload: FoodEntryPayload = serde_json::from_value(json!({
            "date": "2025-01-02", "amount": 100, "consumable_id": 1.5
        }))
        .unwrap();

        assert_eq!(field_of(payload.into_new_entry().unwrap_err()), "consumable_id");
    }

    #[test]
    fn test_goal_payload() {
        let payload: GoalPayload = serde_json::from_value(json!({
            "date": "2025-01-01", "calories": "2000", "protein": 150, "carbs": 200, "fat": 70
        }))
        .unwrap();

        let (date, targets) = payload.into_parts().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(targets, Macros::new(2000.0, 150.0, 200.0, 70.0));
    }

    #[test]
    fn test_analyze_payload_aliases() {
        let payload: AnalyzePayload =
            serde_json::from_value(json!({ "imageBase64": "aGVsbG8=" })).unwrap();
        assert_eq!(payload.image_base64.as_deref(), Some("aGVsbG8="));
        assert_eq!(payload.description, None);
    }
}
