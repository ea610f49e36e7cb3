//! CSV data loader.
//!
//! Every request reads its dataset fresh from disk. A recognized college type
//! whose file is absent yields an empty dataset rather than an error, so
//! callers can tell "unknown type" (`None`) apart from "no data yet".

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::colleges::models::{CollegeRecord, CollegeType, Dataset, CATEGORY_COLUMN};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("CSV missing '{0}' column")]
    MissingColumn(String),

    #[error("CSV row {row} has {found} fields but the header has {expected}")]
    TooManyFields {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Loads and normalizes the dataset for a college-type tag.
///
/// Returns `Ok(None)` for an unrecognized tag and an empty dataset when the
/// backing file does not exist.
pub fn load_data(data_dir: &Path, tag: &str) -> Result<Option<Dataset>, LoadError> {
    let Some(college_type) = CollegeType::parse(tag) else {
        debug!("Unrecognized college type '{tag}'");
        return Ok(None);
    };

    let path = data_dir.join(college_type.file_name());
    if !path.exists() {
        debug!("No data file at {}", path.display());
        return Ok(Some(Dataset::empty(college_type)));
    }

    let file = std::fs::File::open(&path)?;
    let dataset = read_dataset(file, college_type)?;
    debug!(
        "Loaded {} {college_type} college rows from {}",
        dataset.len(),
        path.display()
    );
    Ok(Some(dataset))
}

/// Parses CSV text (header row required) into a normalized dataset.
///
/// Short rows are padded: missing cells read as empty. Rows longer than the
/// header are rejected.
pub fn read_dataset<R: std::io::Read>(
    reader: R,
    college_type: CollegeType,
) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let category_idx = column_index(&headers, CATEGORY_COLUMN)?;
    let cutoff_idx = column_index(&headers, college_type.cutoff_column())?;

    let mut records = Vec::new();
    let mut coerced = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(LoadError::TooManyFields {
                row: row_no,
                found: record.len(),
                expected: headers.len(),
            });
        }

        let raw_cutoff = record.get(cutoff_idx).unwrap_or("");
        let cutoff = parse_cutoff(raw_cutoff).unwrap_or_else(|| {
            debug!("Row {row_no}: cutoff '{raw_cutoff}' is not a number, using 0");
            coerced += 1;
            0.0
        });

        let category = record.get(category_idx).unwrap_or("").to_uppercase();

        let mut fields = Map::new();
        for (col_idx, name) in headers.iter().enumerate() {
            if col_idx == category_idx || col_idx == cutoff_idx {
                continue;
            }
            fields.insert(name.clone(), guess_value(record.get(col_idx).unwrap_or("")));
        }

        records.push(CollegeRecord {
            category,
            cutoff,
            fields,
        });
    }

    if coerced > 0 {
        debug!("Coerced {coerced} malformed {college_type} cutoffs to 0");
    }

    Ok(Dataset {
        college_type,
        records,
    })
}

fn column_index(headers: &[String], name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

/// `None` when the cell is empty, unparseable or NaN.
fn parse_cutoff(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn guess_value(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(s.to_string())
}
