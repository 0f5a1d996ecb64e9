//! Typed classifier input and output

use serde::{Deserialize, Serialize};

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 10;

/// Column names the classifier was trained on, in input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Suhu_Tubuh_C",
    "Frekuensi_Batuk_per_Jam",
    "Skala_Nyeri_Tenggorokan",
    "Tingkat_Sesak_Napas",
    "Durasi_Sakit_Hari",
    "Nyeri_Otot_Sendi_Skala",
    "Sakit_Kepala_Skala",
    "Nafsu_Makan_Penurunan_Skala",
    "Usia_Tahun",
    "Riwayat_Kontak_Positif",
];

/// Self-reported symptom measurements
///
/// Ordinal scales run 0 (none) to 3 (severe). Ranges are enforced by the
/// form, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub body_temperature_c: f64,
    pub cough_per_hour: u32,
    pub sore_throat: u8,
    pub breathlessness: u8,
    pub illness_days: u32,
    pub muscle_pain: u8,
    pub headache: u8,
    pub appetite_loss: u8,
    pub age_years: u32,
    pub prior_contact: bool,
}

impl SymptomRecord {
    /// Feature vector in the order of `FEATURE_NAMES`
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.body_temperature_c,
            f64::from(self.cough_per_hour),
            f64::from(self.sore_throat),
            f64::from(self.breathlessness),
            f64::from(self.illness_days),
            f64::from(self.muscle_pain),
            f64::from(self.headache),
            f64::from(self.appetite_loss),
            f64::from(self.age_years),
            if self.prior_contact { 1.0 } else { 0.0 },
        ]
    }
}

impl Default for SymptomRecord {
    /// Initial values shown on the form
    fn default() -> Self {
        Self {
            body_temperature_c: 37.0,
            cough_per_hour: 10,
            sore_throat: 1,
            breathlessness: 1,
            illness_days: 3,
            muscle_pain: 1,
            headache: 2,
            appetite_loss: 2,
            age_years: 0,
            prior_contact: false,
        }
    }
}

/// Probability assigned to one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProbability {
    pub label: String,
    pub probability: f64,
}

/// Classifier output resolved against the label encoder
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Index of the winning category in encoder order
    pub index: usize,
    pub label: String,
    pub probability: f64,
    /// Full vector, aligned with the encoder's categories
    pub probabilities: Vec<LabelProbability>,
}

impl Prediction {
    /// Categories other than the predicted one at or above `threshold`,
    /// in encoder order
    pub fn others_above(&self, threshold: f64) -> Vec<LabelProbability> {
        self.probabilities
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != self.index && p.probability >= threshold)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

/// Index of the largest value; the first one wins on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
