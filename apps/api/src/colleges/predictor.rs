use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::colleges::models::{CollegeRecord, Dataset};

/// Eligible colleges, highest cutoff first, each rendered as a JSON object.
pub type PredictionResult = Vec<Map<String, Value>>;

/// Returns the colleges a student with `marks` in `category` qualifies for.
///
/// A row is eligible when its category matches case-insensitively and
/// `marks >= cutoff`. Rows are ordered by cutoff descending; equal cutoffs
/// keep their dataset order. No matches is an empty result, not an error.
pub fn predict(dataset: &Dataset, marks: f64, category: &str) -> PredictionResult {
    let category = category.to_uppercase();

    let mut eligible: Vec<&CollegeRecord> = dataset
        .records
        .iter()
        .filter(|record| record.category == category && marks >= record.cutoff)
        .collect();

    // `sort_by` is stable
    eligible.sort_by(|a, b| b.cutoff.partial_cmp(&a.cutoff).unwrap_or(Ordering::Equal));

    eligible.into_iter().map(CollegeRecord::to_json).collect()
}
