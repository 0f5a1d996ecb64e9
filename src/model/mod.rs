//! Model store: pre-trained classifier + label encoder
//!
//! Both artifacts are read once per process. `ModelStore::load` caches the
//! result and hands out the same `Arc<LoadedModel>` on every later call.

pub mod encoder;
pub mod naive_bayes;
pub mod types;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

use crate::errors::{IspaError, Result};
pub use encoder::LabelEncoder;
pub use naive_bayes::GaussianNaiveBayes;
pub use types::{argmax, LabelProbability, Prediction, SymptomRecord, FEATURE_COUNT, FEATURE_NAMES};

/// A fitted model producing one probability per category
pub trait Classifier: Send + Sync {
    /// Number of output columns
    fn n_classes(&self) -> usize;

    /// Probability per category, summing to 1
    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> Result<Vec<f64>>;
}

/// Classifier paired with the encoder naming its output columns
pub struct LoadedModel {
    classifier: Box<dyn Classifier>,
    encoder: LabelEncoder,
}

impl LoadedModel {
    /// Pair a classifier with its encoder, checking they agree on class count
    pub fn new(classifier: Box<dyn Classifier>, encoder: LabelEncoder) -> Result<Self> {
        if classifier.n_classes() != encoder.len() {
            return Err(IspaError::ModelShape(format!(
                "classifier has {} classes but label encoder has {}",
                classifier.n_classes(),
                encoder.len()
            )));
        }
        Ok(Self { classifier, encoder })
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    /// Classify a symptom record
    pub fn predict(&self, symptoms: &SymptomRecord) -> Result<Prediction> {
        let probs = self.classifier.predict_proba(&symptoms.features())?;
        if probs.len() != self.encoder.len() {
            return Err(IspaError::ModelShape(format!(
                "classifier returned {} probabilities for {} classes",
                probs.len(),
                self.encoder.len()
            )));
        }

        let index = argmax(&probs)
            .ok_or_else(|| IspaError::ModelShape("empty probability vector".to_string()))?;

        let probabilities: Vec<LabelProbability> = self
            .encoder
            .classes()
            .iter()
            .zip(&probs)
            .map(|(label, &probability)| LabelProbability {
                label: label.clone(),
                probability,
            })
            .collect();

        let label = self
            .encoder
            .decode(index)
            .ok_or_else(|| IspaError::ModelShape(format!("no category for column {}", index)))?
            .to_string();
        let probability = probs[index];
        debug!(label = %label, probability, "classifier prediction");

        Ok(Prediction {
            index,
            label,
            probability,
            probabilities,
        })
    }
}

/// Loads and caches the model artifacts
pub struct ModelStore {
    model_path: PathBuf,
    encoder_path: PathBuf,
    cache: OnceLock<Arc<LoadedModel>>,
}

impl ModelStore {
    pub fn new(model_path: impl Into<PathBuf>, encoder_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            encoder_path: encoder_path.into(),
            cache: OnceLock::new(),
        }
    }

    /// Store that is already populated, bypassing the filesystem
    pub fn preloaded(model: LoadedModel) -> Self {
        let cache = OnceLock::new();
        let _ = cache.set(Arc::new(model));
        Self {
            model_path: PathBuf::new(),
            encoder_path: PathBuf::new(),
            cache,
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn encoder_path(&self) -> &Path {
        &self.encoder_path
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Load both artifacts, or return the cached pair
    pub fn load(&self) -> Result<Arc<LoadedModel>> {
        if let Some(model) = self.cache.get() {
            return Ok(Arc::clone(model));
        }

        let classifier: GaussianNaiveBayes = read_artifact(&self.model_path)?;
        classifier.validate()?;
        let encoder: LabelEncoder = read_artifact(&self.encoder_path)?;
        let encoder = LabelEncoder::new(encoder.classes().to_vec())?;

        let model = LoadedModel::new(Box::new(classifier), encoder)?;
        info!(
            model = %self.model_path.display(),
            encoder = %self.encoder_path.display(),
            classes = model.encoder().len(),
            "model artifacts loaded"
        );

        Ok(Arc::clone(self.cache.get_or_init(|| Arc::new(model))))
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| IspaError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| IspaError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: format!("malformed artifact: {}", e),
    })
}
