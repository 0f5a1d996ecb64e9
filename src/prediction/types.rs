//! Identity and outcome types for the prediction form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::history::HistoryRecord;
use crate::model::{LabelProbability, Prediction};

/// Gender options offered on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Perempuan")]
    Perempuan,
    #[serde(rename = "Laki-laki")]
    LakiLaki,
}

impl Gender {
    /// All options, in the order the form lists them
    pub const ALL: [Gender; 2] = [Gender::Perempuan, Gender::LakiLaki];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Perempuan => "Perempuan",
            Gender::LakiLaki => "Laki-laki",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "perempuan" | "p" => Ok(Gender::Perempuan),
            "laki-laki" | "laki laki" | "lakilaki" | "l" => Ok(Gender::LakiLaki),
            other => Err(format!("Unknown gender option: {}", other)),
        }
    }
}

/// Who the prediction is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
}

impl Identity {
    pub fn new(name: impl Into<String>, gender: Gender, age: u32) -> Self {
        Self {
            name: name.into(),
            gender,
            age,
        }
    }

    /// A name made only of whitespace counts as missing
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Everything shown to the user after a completed prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub name: String,
    pub prediction: Prediction,
    /// Other categories at or above the significance threshold
    pub others: Vec<LabelProbability>,
    pub advice: String,
    /// Predicted category is the "no infection" one
    pub negative: bool,
    pub record: HistoryRecord,
    /// The record reached the history store
    pub persisted: bool,
}

impl PredictionOutcome {
    pub fn label(&self) -> &str {
        &self.prediction.label
    }

    pub fn probability(&self) -> f64 {
        self.prediction.probability
    }

    pub fn probability_percent(&self) -> String {
        percent(self.prediction.probability)
    }
}

/// Whole-number percentage, e.g. `0.75` -> `75%`
pub fn percent(probability: f64) -> String {
    format!("{:.0}%", probability * 100.0)
}
