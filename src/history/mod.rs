//! Prediction history: append-only record log and its sorted view

pub mod csv_store;
pub mod view;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
pub use csv_store::CsvHistoryStore;
pub use view::{HistoryEntry, HistoryTable, HistoryView};

/// Timestamp layout used in the history file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row of the history file
pub const HISTORY_HEADER: [&str; 6] = [
    "Nama",
    "Jenis Kelamin",
    "Usia",
    "prediksi",
    "Probabilitas",
    "Waktu",
];

/// One completed prediction, as written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    #[serde(rename = "Nama")]
    pub name: String,
    #[serde(rename = "Jenis Kelamin")]
    pub gender: String,
    #[serde(rename = "Usia")]
    pub age: u32,
    #[serde(rename = "prediksi")]
    pub predicted_label: String,
    #[serde(rename = "Probabilitas")]
    pub probability: f64,
    #[serde(rename = "Waktu")]
    pub timestamp: String,
}

impl HistoryRecord {
    /// Build a record, rounding the probability to two decimals
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        age: u32,
        predicted_label: impl Into<String>,
        probability: f64,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            age,
            predicted_label: predicted_label.into(),
            probability: round_to_cents(probability),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// One stored row, as read back
///
/// Fields are kept as text so rows with damaged values still count as
/// stored rows; coercion happens in the view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryRow {
    #[serde(rename = "Nama")]
    pub name: String,
    #[serde(rename = "Jenis Kelamin")]
    pub gender: String,
    #[serde(rename = "Usia")]
    pub age: String,
    #[serde(rename = "prediksi")]
    pub predicted_label: String,
    #[serde(rename = "Probabilitas")]
    pub probability: String,
    #[serde(rename = "Waktu")]
    pub timestamp: String,
}

impl HistoryRow {
    /// Probability as a number, if the stored text is a finite number
    pub fn probability_value(&self) -> Option<f64> {
        self.probability
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
    }
}

/// Append-only storage for prediction history
pub trait HistoryStore {
    /// Append one record, creating the backing store on first use
    fn append(&self, record: &HistoryRecord) -> Result<()>;

    /// All stored rows in insertion order; empty when nothing was stored yet
    fn read_all(&self) -> Result<Vec<HistoryRow>>;
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap()
    }

    #[test]
    fn test_record_rounds_probability() {
        let record = HistoryRecord::new("Sari", "Perempuan", 30, "Rinitis", 0.8765, at());
        assert_eq!(record.probability, 0.88);
    }

    #[test]
    fn test_record_timestamp_format() {
        let record = HistoryRecord::new("Sari", "Perempuan", 30, "Rinitis", 0.5, at());
        assert_eq!(record.timestamp, "2024-03-07 09:05:01");
    }

    #[test]
    fn test_probability_value_coercion() {
        let mut row = HistoryRow {
            name: "Budi".to_string(),
            gender: "Laki-laki".to_string(),
            age: "40".to_string(),
            predicted_label: "Pneumonia".to_string(),
            probability: " 0.75 ".to_string(),
            timestamp: "2024-03-07 09:05:01".to_string(),
        };
        assert_eq!(row.probability_value(), Some(0.75));

        row.probability = "N/A".to_string();
        assert_eq!(row.probability_value(), None);

        row.probability = "NaN".to_string();
        assert_eq!(row.probability_value(), None);

        row.probability = String::new();
        assert_eq!(row.probability_value(), None);
    }
}
