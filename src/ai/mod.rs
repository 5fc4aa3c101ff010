//! Nutrition estimation through an external vision-language model.
//!
//! The estimator turns a food photo and/or description, or a photo of a nutrition label,
//! into a [`NutritionEstimate`]. The model itself sits behind the [`VisionModel`] trait;
//! [`OpenAiVisionClient`] talks to any OpenAI-compatible chat-completions endpoint.
//!
//! Estimates are never silently defaulted: a reply that is not JSON, or that lacks a
//! name or calories, is an [`Error::Estimation`](crate::errors::Error::Estimation) and
//! the caller is expected to fall back to manual entry.

/// OpenAI-compatible HTTP client
pub mod client;
/// Orchestration and logging of estimate requests
pub mod estimator;
/// Reply cleanup and validation
pub mod parse;
/// System instructions and request construction
pub mod prompt;

pub use client::OpenAiVisionClient;
pub use estimator::NutritionEstimator;

use crate::{core::nutrition::Macros, errors::Result};
use async_trait::async_trait;
use serde::Serialize;

/// Nutrition facts per serving, as estimated by the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionEstimate {
    /// Name of the food or product
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein grams per serving
    pub protein: f64,
    /// Carbohydrate grams per serving
    pub carbs: f64,
    /// Fat grams per serving
    pub fat: f64,
    /// Serving size in grams, when the model gave one
    pub serving_size: Option<f64>,
}

impl NutritionEstimate {
    /// The four macro values of the estimate.
    #[must_use]
    pub const fn macros(&self) -> Macros {
        Macros::new(self.calories, self.protein, self.carbs, self.fat)
    }
}

/// A single prompt for a vision-capable chat model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionRequest {
    /// System instruction fixing the reply format
    pub system: String,
    /// User text
    pub text: String,
    /// Image as a `data:` URL, if any
    pub image_url: Option<String>,
    /// Upper bound on reply length
    pub max_tokens: u32,
}

/// A chat model that can look at an image and answer in text.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Sends `request` and returns the raw text of the reply.
    ///
    /// # Errors
    /// Returns [`Error::Provider`](crate::errors::Error::Provider) when the provider
    /// cannot be reached, answers with an error status, or returns no content.
    async fn complete(&self, request: &VisionRequest) -> Result<String>;
}
