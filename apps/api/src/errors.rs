use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Raised while loading a candidate profile or building the engine from it.
/// These are startup failures; nothing in here can happen while scoring.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed profile document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Empty keyword in profile field '{field}'")]
    EmptyKeyword { field: &'static str },

    #[error("Keyword '{keyword}' in '{field}' does not compile: {source}")]
    InvalidPattern {
        field: &'static str,
        keyword: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid years window in '{field}': min {min} > max {max}")]
    InvalidWindow {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_validation_error_maps_to_400_with_code() {
        let response = AppError::Validation("jobs cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(value["error"]["message"], "jobs cannot be empty");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("task panicked")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "INTERNAL_ERROR");
        assert!(!value["error"]["message"]
            .as_str()
            .unwrap()
            .contains("panicked"));
    }

    #[test]
    fn test_profile_error_messages_name_the_field() {
        let err = ProfileError::EmptyKeyword { field: "roles" };
        assert!(err.to_string().contains("roles"));

        let err = ProfileError::InvalidWindow {
            field: "experience.candidate_years",
            min: 5,
            max: 2,
        };
        assert!(err.to_string().contains("min 5 > max 2"));
    }
}
