//! Maps [`Error`] onto HTTP responses.
//!
//! Bodies are always `{"error": "..."}`, with a `field` key for validation failures.
//! Upstream and internal failures are logged here, once, and the internal ones are
//! reported to the caller without detail.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

const ESTIMATION_FAILED: &str =
    "Failed to analyze food. Please try again or enter the values manually.";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl Error {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::UserNotFound { .. }
            | Self::ConsumableNotFound { .. }
            | Self::FoodEntryNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Estimation { .. } | Self::Provider { .. } => StatusCode::BAD_GATEWAY,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation { field, message } => ErrorBody {
                error: message.clone(),
                field: Some(field.clone()),
            },
            Self::UserNotFound { .. }
            | Self::ConsumableNotFound { .. }
            | Self::FoodEntryNotFound { .. } => ErrorBody {
                error: self.to_string(),
                field: None,
            },
            Self::Estimation { .. } | Self::Provider { .. } => {
                warn!("Returning {} for upstream failure: {}", status, self);
                ErrorBody {
                    error: ESTIMATION_FAILED.to_string(),
                    field: None,
                }
            }
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                error!("Request failed: {}", self);
                ErrorBody {
                    error: INTERNAL_ERROR.to_string(),
                    field: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use sea_orm::DbErr;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_names_field() {
        let response = Error::validation("calories", "must be a number").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "must be a number");
        assert_eq!(body["field"], "calories");
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = Error::ConsumableNotFound { id: 7 }.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Consumable not found: 7");
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let response = Error::Database(DbErr::Custom("disk I/O error".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR);
    }

    #[test]
    fn test_upstream_errors_are_bad_gateway() {
        assert_eq!(Error::estimation("no name").status(), StatusCode::BAD_GATEWAY);
        assert_eq!(Error::provider("timeout").status(), StatusCode::BAD_GATEWAY);
    }
}
