//! Axum route handlers for the prediction API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::colleges::loader::load_data;
use crate::colleges::predictor::{predict, PredictionResult};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub college_type: String,
    pub marks: MarksInput,
    pub category: String,
}

/// Marks arrive either as a JSON number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MarksInput {
    Number(f64),
    Text(String),
}

impl MarksInput {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            MarksInput::Number(n) => Some(*n),
            MarksInput::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

/// POST /predict
///
/// Validates the body before touching any data, then loads the dataset for
/// the requested college type and returns the eligible colleges.
pub async fn handle_predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let marks = request.marks.to_f64().ok_or_else(|| {
        AppError::Validation(format!("marks {:?} is not a number", request.marks))
    })?;

    let dataset = load_data(&state.config.data_dir, &request.college_type)
        .map_err(|source| AppError::DataLoad {
            college_type: request.college_type.clone(),
            source,
        })?
        .filter(|dataset| !dataset.is_empty())
        .ok_or_else(|| AppError::DataUnavailable {
            college_type: request.college_type.clone(),
        })?;

    let result = predict(&dataset, marks, &request.category);
    info!(
        "Predicted {} eligible {} colleges for category {}",
        result.len(),
        dataset.college_type,
        request.category.to_uppercase()
    );

    Ok(Json(result))
}
