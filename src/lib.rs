//! ISPA Predict - Interactive Respiratory Infection Screening
//!
//! Collects self-reported symptoms through a terminal form, classifies
//! them with a pre-trained Gaussian Naive Bayes model, shows the predicted
//! category with first-aid advice, and keeps a CSV history of results.
//!
//! # Architecture
//!
//! - **model**: artifact loading (once per process) and classification
//! - **history**: append-only CSV store and the newest-first view
//! - **prediction**: the validate-classify-advise-record transaction
//! - **repl**: navigation menu, terminal form, rendering

pub mod errors;

pub use errors::{IspaError, Result};

pub mod history;
pub mod model;
pub mod prediction;

// Interface layer
pub mod cli;
pub mod logging;
pub mod repl;
