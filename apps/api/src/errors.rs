use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::colleges::loader::LoadError;

/// Message returned for any malformed `/predict` body.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please check your entries.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown college type, or a known type with no rows to predict from.
    #[error("Could not load data for {college_type} colleges.")]
    DataUnavailable { college_type: String },

    #[error("Failed to load data for {college_type} colleges: {source}")]
    DataLoad {
        college_type: String,
        #[source]
        source: LoadError,
    },
}

impl AppError {
    fn unavailable_message(college_type: &str) -> String {
        format!("Could not load data for {college_type} colleges.")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => {
                tracing::debug!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, INVALID_INPUT_MESSAGE.to_string())
            }
            AppError::DataUnavailable { college_type } => {
                tracing::warn!("No data available for college type '{college_type}'");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::unavailable_message(college_type),
                )
            }
            AppError::DataLoad {
                college_type,
                source,
            } => {
                tracing::error!("Data load error for '{college_type}': {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::unavailable_message(college_type),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
