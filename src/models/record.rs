//! Alert record model

use chrono::NaiveDateTime;
use serde::Serialize;

/// Time-series bucket taken verbatim from the `hour` column.
///
/// Integer buckets sort numerically and come before free-form labels,
/// which sort lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum HourBucket {
    Numeric(i64),
    Label(String),
}

impl HourBucket {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return HourBucket::Numeric(n);
        }
        // "3.0" shows up when the column was written out as floats
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => HourBucket::Numeric(f as i64),
            _ => HourBucket::Label(raw.to_string()),
        }
    }
}

/// One row of the alert file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: Option<NaiveDateTime>,
    pub severity: String,
    pub affected_system: String,
    pub threat_type: String,
    /// `None` when the cell was empty
    pub response_time_minutes: Option<f64>,
    pub hour: HourBucket,
    /// Every cell of the row in file column order.
    pub values: Vec<String>,
}
