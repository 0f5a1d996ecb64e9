//! Gaussian Naive Bayes classifier loaded from exported parameters
//!
//! The artifact carries the fitted `class_prior`, per-class feature means
//! (`theta`) and variances (`var`). Probabilities are the normalised joint
//! likelihoods:
//!
//! ```text
//! jll_c = ln(prior_c) - 0.5 * Σ_j ln(2π var_cj) - 0.5 * Σ_j (x_j - θ_cj)² / var_cj
//! p_c   = exp(jll_c - logsumexp(jll))
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{IspaError, Result};
use crate::model::types::{FEATURE_COUNT, FEATURE_NAMES};
use crate::model::Classifier;

/// Fitted Gaussian Naive Bayes parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNaiveBayes {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub class_prior: Vec<f64>,
    pub theta: Vec<Vec<f64>>,
    pub var: Vec<Vec<f64>>,
}

impl GaussianNaiveBayes {
    /// Check the parameter shapes against the fixed feature layout
    pub fn validate(&self) -> Result<()> {
        let k = self.class_prior.len();
        if k == 0 {
            return Err(IspaError::ModelShape("classifier has no classes".to_string()));
        }
        if self.theta.len() != k || self.var.len() != k {
            return Err(IspaError::ModelShape(format!(
                "expected {} rows in theta and var, found {} and {}",
                k,
                self.theta.len(),
                self.var.len()
            )));
        }

        for (c, (means, vars)) in self.theta.iter().zip(&self.var).enumerate() {
            if means.len() != FEATURE_COUNT || vars.len() != FEATURE_COUNT {
                return Err(IspaError::ModelShape(format!(
                    "class {} has {} means and {} variances, expected {}",
                    c,
                    means.len(),
                    vars.len(),
                    FEATURE_COUNT
                )));
            }
            if let Some(v) = vars.iter().find(|v| !(**v > 0.0) || !v.is_finite()) {
                return Err(IspaError::ModelShape(format!(
                    "class {} has non-positive variance {}",
                    c, v
                )));
            }
        }

        if let Some(p) = self.class_prior.iter().find(|p| !(**p > 0.0)) {
            return Err(IspaError::ModelShape(format!("class prior {} is not positive", p)));
        }

        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(IspaError::ModelShape(format!(
                    "feature names {:?} do not match expected order {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }

        Ok(())
    }

    fn joint_log_likelihood(&self, x: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        self.class_prior
            .iter()
            .zip(self.theta.iter().zip(&self.var))
            .map(|(prior, (means, vars))| {
                let mut jll = prior.ln();
                for j in 0..FEATURE_COUNT {
                    let var = vars[j];
                    let diff = x[j] - means[j];
                    jll -= 0.5 * (2.0 * PI * var).ln();
                    jll -= 0.5 * diff * diff / var;
                }
                jll
            })
            .collect()
    }
}

impl Classifier for GaussianNaiveBayes {
    fn n_classes(&self) -> usize {
        self.class_prior.len()
    }

    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> Result<Vec<f64>> {
        if let Some(bad) = features.iter().find(|f| !f.is_finite()) {
            return Err(IspaError::Validation(format!("feature value {} is not finite", bad)));
        }

        let jll = self.joint_log_likelihood(features);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|l| (l - max).exp()).sum::<f64>().ln();

        Ok(jll.iter().map(|l| (l - log_norm).exp()).collect())
    }
}
