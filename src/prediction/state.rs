//! Prediction transaction state machine
//!
//! Valid transitions:
//! 1. AwaitingSubmission → Validating  (on: Submit)
//! 2. Validating         → Completed   (on: ValidationPassed)
//! 3. Validating         → Rejected    (on: ValidationFailed)
//! 4. Completed, Rejected are terminal (self-loops)

use serde::{Deserialize, Serialize};

use crate::errors::{IspaError, Result};

/// Transaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    /// Form is being filled, nothing computed yet
    AwaitingSubmission,

    /// Submitted, checking the identity fields
    Validating,

    /// Prediction shown and handed to the history store (terminal)
    Completed,

    /// Submission refused before any side effect (terminal)
    Rejected,
}

/// Events that drive the transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionEvent {
    Submit,
    ValidationPassed,
    ValidationFailed,
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Completed | TransactionState::Rejected)
    }

    pub fn transition(&self, event: TransactionEvent) -> Result<TransactionState> {
        use TransactionEvent::*;
        use TransactionState::*;

        let next = match (self, event) {
            (AwaitingSubmission, Submit) => Validating,
            (Validating, ValidationPassed) => Completed,
            (Validating, ValidationFailed) => Rejected,

            (Completed, _) => Completed,
            (Rejected, _) => Rejected,

            (from, event) => {
                return Err(IspaError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: format!("{:?}", event),
                });
            }
        };

        Ok(next)
    }
}

impl Default for TransactionState {
    fn default() -> Self {
        TransactionState::AwaitingSubmission
    }
}
