//! Nutrition estimates from a photo, a description, or a nutrition label.

use super::{NutritionEstimate, VisionModel, parse, prompt};
use crate::errors::Result;
use std::sync::Arc;
use tracing::{error, info};

/// Builds prompts, calls the vision model, and validates its reply.
#[derive(Clone)]
pub struct NutritionEstimator {
    model: Arc<dyn VisionModel>,
}

impl NutritionEstimator {
    /// Wraps a vision model.
    #[must_use]
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Estimates nutrition for a meal from an image, a description, or both.
    ///
    /// # Errors
    /// - [`Error::Validation`](crate::errors::Error::Validation) when neither input is
    ///   given or the image is not valid base64
    /// - [`Error::Provider`](crate::errors::Error::Provider) when the model call fails
    /// - [`Error::Estimation`](crate::errors::Error::Estimation) when the reply is unusable
    pub async fn estimate_food(
        &self,
        image_base64: Option<&str>,
        description: Option<&str>,
    ) -> Result<NutritionEstimate> {
        let request = prompt::food_request(image_base64, description)?;
        let has_image = request.image_url.is_some();

        let reply = self
            .model
            .complete(&request)
            .await
            .inspect_err(|e| error!(has_image, "Food analysis request failed: {}", e))?;

        parse::parse_estimate(&reply)
            .inspect(|estimate| {
                info!(
                    has_image,
                    "Estimated '{}' at {} kcal", estimate.name, estimate.calories
                );
            })
            .inspect_err(|e| error!(has_image, "Food analysis reply rejected: {}", e))
    }

    /// Reads per-serving values off a photo of a nutrition label.
    ///
    /// # Errors
    /// Same as [`estimate_food`](Self::estimate_food); the image is required.
    pub async fn read_label(&self, image_base64: Option<&str>) -> Result<NutritionEstimate> {
        let request = prompt::label_request(image_base64)?;

        let reply = self
            .model
            .complete(&request)
            .await
            .inspect_err(|e| error!("Label analysis request failed: {}", e))?;

        parse::parse_estimate(&reply)
            .inspect(|estimate| info!("Read label for '{}'", estimate.name))
            .inspect_err(|e| error!("Label analysis reply rejected: {}", e))
    }
}
