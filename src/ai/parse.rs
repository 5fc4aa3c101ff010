//! Reply cleanup and validation.
//!
//! Models often wrap JSON in markdown fences even when told not to. The fences are
//! removed, the JSON is parsed, and the fields are checked. `name` and `calories` are
//! required. `protein`, `carbs`, and `fat` read as 0 when absent, matching the label
//! instruction to use 0 for unreadable values.

use super::NutritionEstimate;
use crate::{
    core::LenientNumber,
    errors::{Error, Result},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawEstimate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    calories: Option<LenientNumber>,
    #[serde(default)]
    protein: Option<LenientNumber>,
    #[serde(default)]
    carbs: Option<LenientNumber>,
    #[serde(default)]
    fat: Option<LenientNumber>,
    #[serde(default, rename = "servingSize", alias = "serving_size")]
    serving_size: Option<LenientNumber>,
}

/// Removes markdown code fences (```` ```json ```` and ```` ``` ````) and surrounding whitespace.
#[must_use]
pub fn strip_code_fences(reply: &str) -> String {
    reply.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses a model reply into a validated estimate.
///
/// # Errors
/// Returns [`Error::Estimation`] if the reply is not a JSON object, if `name` or
/// `calories` is missing, or if any number is unreadable, negative, or not finite.
pub fn parse_estimate(reply: &str) -> Result<NutritionEstimate> {
    let cleaned = strip_code_fences(reply);
    let raw: RawEstimate = serde_json::from_str(&cleaned)
        .map_err(|e| Error::estimation(format!("reply is not a valid nutrition JSON object: {e}")))?;

    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::estimation("reply is missing the food name"))?
        .to_string();

    let calories = match raw.calories.as_ref() {
        Some(value) => amount("calories", value)?,
        None => return Err(Error::estimation("reply is missing calories")),
    };

    let serving_size = raw
        .serving_size
        .as_ref()
        .map(|value| amount("servingSize", value))
        .transpose()?
        .filter(|size| *size > 0.0);

    Ok(NutritionEstimate {
        name,
        calories,
        protein: optional_amount("protein", raw.protein.as_ref())?,
        carbs: optional_amount("carbs", raw.carbs.as_ref())?,
        fat: optional_amount("fat", raw.fat.as_ref())?,
        serving_size,
    })
}

fn amount(field: &str, value: &LenientNumber) -> Result<f64> {
    let number = value
        .value()
        .ok_or_else(|| Error::estimation(format!("{field} is not a number")))?;
    if !number.is_finite() || number < 0.0 {
        return Err(Error::estimation(format!(
            "{field} must be a non-negative number, got {number}"
        )));
    }
    Ok(number)
}

fn optional_amount(field: &str, value: Option<&LenientNumber>) -> Result<f64> {
    value.map_or(Ok(0.0), |v| amount(field, v))
}
