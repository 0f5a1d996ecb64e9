//! Prediction transaction: validate, classify, advise, record
//!
//! A transaction handles exactly one form submission. The model and the
//! history store are injected by reference; nothing here is global.

pub mod advice;
pub mod state;
pub mod types;

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::errors::{IspaError, Result};
use crate::history::{HistoryRecord, HistoryStore};
use crate::model::{LoadedModel, SymptomRecord};
pub use advice::{advice_for, is_negative};
pub use state::{TransactionEvent, TransactionState};
pub use types::{percent, Gender, Identity, PredictionOutcome};

/// Minimum probability for another category to be worth mentioning
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.01;

/// Warning shown when the name field is left empty
pub const MISSING_NAME_WARNING: &str = "Mohon isi Nama Lengkap Anda untuk melanjutkan.";

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Refused before touching the model or the history store
    Rejected { warning: String },
    Completed(PredictionOutcome),
}

/// One submit of the prediction form
pub struct PredictionTransaction<'a, H: HistoryStore + ?Sized> {
    model: &'a LoadedModel,
    history: &'a H,
    state: TransactionState,
}

impl<'a, H: HistoryStore + ?Sized> PredictionTransaction<'a, H> {
    pub fn new(model: &'a LoadedModel, history: &'a H) -> Self {
        Self {
            model,
            history,
            state: TransactionState::AwaitingSubmission,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Submit the form, stamping the record with the local time
    pub fn submit(&mut self, identity: &Identity, symptoms: &SymptomRecord) -> Result<Submission> {
        self.submit_at(identity, symptoms, Local::now().naive_local())
    }

    /// Submit the form with an explicit record timestamp
    ///
    /// A classifier error leaves the transaction in `Validating`.
    pub fn submit_at(
        &mut self,
        identity: &Identity,
        symptoms: &SymptomRecord,
        at: NaiveDateTime,
    ) -> Result<Submission> {
        if self.state != TransactionState::AwaitingSubmission {
            return Err(IspaError::InvalidTransition {
                from: format!("{:?}", self.state),
                event: format!("{:?}", TransactionEvent::Submit),
            });
        }
        self.state = self.state.transition(TransactionEvent::Submit)?;

        if !identity.has_name() {
            self.state = self.state.transition(TransactionEvent::ValidationFailed)?;
            return Ok(Submission::Rejected {
                warning: MISSING_NAME_WARNING.to_string(),
            });
        }

        let prediction = self.model.predict(symptoms)?;
        let others = prediction.others_above(SIGNIFICANCE_THRESHOLD);
        let negative = is_negative(&prediction.label);
        let advice = advice_for(&prediction.label);

        let record = HistoryRecord::new(
            identity.name.as_str(),
            identity.gender.as_str(),
            identity.age,
            prediction.label.as_str(),
            prediction.probability,
            at,
        );

        self.state = self.state.transition(TransactionEvent::ValidationPassed)?;
        info!(label = %prediction.label, probability = prediction.probability, "prediction completed");

        // The prediction stands even if it cannot be recorded
        let persisted = match self.history.append(&record) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to append prediction to history");
                false
            }
        };

        Ok(Submission::Completed(PredictionOutcome {
            name: identity.name.clone(),
            prediction,
            others,
            advice,
            negative,
            record,
            persisted,
        }))
    }
}
