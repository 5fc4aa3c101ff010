//! System instructions and request construction for nutrition estimates.

use super::VisionRequest;
use crate::errors::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Reply length cap for every estimate request.
pub const MAX_TOKENS: u32 = 500;

/// Instruction for estimating a meal from a photo and/or description.
pub const FOOD_SYSTEM_PROMPT: &str = r#"You are a nutritionist AI. Analyze the food image and description provided and return ONLY a JSON object with nutritional estimates per serving. Format:
{
  "name": "food name",
  "calories": number,
  "protein": number,
  "carbs": number,
  "fat": number,
  "servingSize": number (in grams)
}"#;

/// Instruction for reading a printed nutrition label.
pub const LABEL_SYSTEM_PROMPT: &str = r#"You are a nutrition label analyzer. Extract nutritional information from the nutrition label image and return ONLY a JSON object with the following format:
{
  "name": "product name",
  "servingSize": number (in grams),
  "calories": number,
  "protein": number (in grams),
  "carbs": number (in grams - total carbohydrates),
  "fat": number (in grams - total fat)
}

Extract the values PER SERVING as shown on the label. If any value is not clearly visible, use 0."#;

const LABEL_USER_TEXT: &str =
    "Please analyze this nutrition label and extract the nutritional information.";

/// Builds a meal estimate request. At least one of `image_base64` and `description`
/// must be non-empty.
pub fn food_request(image_base64: Option<&str>, description: Option<&str>) -> Result<VisionRequest> {
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    let image_url = image_base64
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(image_data_url)
        .transpose()?;

    if image_url.is_none() && description.is_none() {
        return Err(Error::validation(
            "description",
            "Either an image or a description is required",
        ));
    }

    let text = description.map_or_else(
        || "Analyze this food.".to_string(),
        |d| format!("Analyze this food: {d}"),
    );

    Ok(VisionRequest {
        system: FOOD_SYSTEM_PROMPT.to_string(),
        text,
        image_url,
        max_tokens: MAX_TOKENS,
    })
}

/// Builds a nutrition label request. The image is required.
pub fn label_request(image_base64: Option<&str>) -> Result<VisionRequest> {
    let image = image_base64
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .ok_or_else(|| Error::validation("image_base64", "An image of the label is required"))?;

    Ok(VisionRequest {
        system: LABEL_SYSTEM_PROMPT.to_string(),
        text: LABEL_USER_TEXT.to_string(),
        image_url: Some(image_data_url(image)?),
        max_tokens: MAX_TOKENS,
    })
}

/// Turns an uploaded image into a `data:` URL.
///
/// A value that already is a `data:` URL is passed through. Anything else must be
/// standard base64 and is labelled as JPEG.
pub fn image_data_url(image: &str) -> Result<String> {
    if image.starts_with("data:") {
        return Ok(image.to_string());
    }

    STANDARD
        .decode(image)
        .map_err(|e| Error::validation("image_base64", format!("is not valid base64: {e}")))?;

    Ok(format!("data:image/jpeg;base64,{image}"))
}
