//! Error types shared by every layer of `MacroBuddy`.
//!
//! Variants carry enough context to build a field-level message for the caller. The
//! mapping from variant to HTTP status lives in [`crate::api::response`].

use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// Request input failed validation
    #[error("{field}: {message}")]
    Validation {
        /// Name of the offending field (e.g. `"calories"`, `"x-user-id"`)
        field: String,
        /// Human-readable description of the problem
        message: String,
    },

    /// No user exists with the given id
    #[error("User not found: {id}")]
    UserNotFound {
        /// The id that was looked up
        id: String,
    },

    /// No consumable exists with the given id
    #[error("Consumable not found: {id}")]
    ConsumableNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No food entry exists with the given id for the requesting user
    #[error("Food entry not found: {id}")]
    FoodEntryNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The AI provider answered, but not with a usable nutrition estimate
    #[error("Estimation failed: {message}")]
    Estimation {
        /// Why the reply was rejected
        message: String,
    },

    /// The AI provider could not be reached or returned an error status
    #[error("AI provider error: {message}")]
    Provider {
        /// Transport or status details
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config file, socket binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds an [`Error::Estimation`].
    pub fn estimation(message: impl Into<String>) -> Self {
        Self::Estimation {
            message: message.into(),
        }
    }

    /// Builds an [`Error::Provider`].
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
