use std::fmt;

use serde_json::{Map, Number, Value};

/// Selects which backing dataset and cutoff semantics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollegeType {
    /// Cutoff is the minimum score out of the lower-secondary (10th) exam.
    Junior,
    /// Cutoff is the minimum score out of the entrance (CET) exam.
    Engineering,
}

impl CollegeType {
    /// Parses the exact lowercase tag sent by clients.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "junior" => Some(Self::Junior),
            "engineering" => Some(Self::Engineering),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Engineering => "engineering",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Junior => "junior_colleges.csv",
            Self::Engineering => "engineering_colleges.csv",
        }
    }

    /// Source column holding the cutoff for this dataset.
    pub fn cutoff_column(self) -> &'static str {
        match self {
            Self::Junior => "cutoff_10th",
            Self::Engineering => "cutoff_cet",
        }
    }
}

impl fmt::Display for CollegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const CATEGORY_COLUMN: &str = "category";
/// Uniform output key for the cutoff, whatever the source column is called.
pub const CUTOFF_FIELD: &str = "cutoff";

/// One row of a college dataset after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CollegeRecord {
    /// Uppercased category label.
    pub category: String,
    /// Always a number; malformed source values are coerced to 0.
    pub cutoff: f64,
    /// Every other column, passed through as typed JSON values.
    pub fields: Map<String, Value>,
}

impl CollegeRecord {
    /// Renders the record with its cutoff under the uniform `cutoff` key.
    pub fn to_json(&self) -> Map<String, Value> {
        let mut row = self.fields.clone();
        row.insert(
            CATEGORY_COLUMN.to_string(),
            Value::String(self.category.clone()),
        );
        row.insert(CUTOFF_FIELD.to_string(), number_value(self.cutoff));
        row
    }
}

/// An ordered, normalized set of records for a single college type.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub college_type: CollegeType,
    pub records: Vec<CollegeRecord>,
}

impl Dataset {
    pub fn empty(college_type: CollegeType) -> Self {
        Self {
            college_type,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Integral values serialize as JSON integers, the rest as floats.
/// Non-finite values have no JSON form and become `null`.
pub fn number_value(x: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if x.is_finite() && x.fract() == 0.0 && x.abs() <= MAX_EXACT {
        Value::from(x as i64)
    } else {
        Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
    }
}
