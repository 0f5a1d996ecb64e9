//! REPL (Read-Eval-Print Loop) for the interactive terminal experience
//!
//! The navigation menu routes to either the prediction form or the
//! history view. Both share the loaded model and the history store but
//! never call each other.

pub mod commands;
pub mod display;
pub mod form;
pub mod input;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

use crate::history::{HistoryStore, HistoryTable, HistoryView};
use crate::model::LoadedModel;
use crate::prediction::{PredictionTransaction, Submission};
use crate::repl::commands::{CommandHandler, Flow};
pub use crate::repl::display::DisplayManager;
pub use crate::repl::form::{FormInput, PredictionForm};
pub use crate::repl::input::{InputHandler, LineSource, ScriptedInput};

const MENU_PROMPT: &str = "ispa> ";

/// Interactive session coordinator
pub struct ReplSession<S: LineSource, H: HistoryStore> {
    input: S,
    command_handler: CommandHandler,
    display_manager: DisplayManager,
    model: Arc<LoadedModel>,
    history: H,
    predictions: usize,
}

impl<S: LineSource, H: HistoryStore> ReplSession<S, H> {
    pub fn new(input: S, model: Arc<LoadedModel>, history: H) -> Self {
        ReplSession {
            input,
            command_handler: CommandHandler::new(),
            display_manager: DisplayManager::new(),
            model,
            history,
            predictions: 0,
        }
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str) {
        self.display_manager
            .show_banner(version, self.model.encoder().classes());
    }

    /// Run until `/exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = self.input.read_line(MENU_PROMPT)? else {
                break;
            };
            if !self.handle_input(&line)? {
                break;
            }
        }
        Ok(())
    }

    /// Handle one menu line; returns false when the session should end
    pub fn handle_input(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        let command = self.command_handler.parse(input);
        match self.command_handler.execute(&command) {
            Flow::Continue => Ok(true),
            Flow::Exit => Ok(false),
            Flow::ClearScreen => {
                if let Err(e) = self.display_manager.clear_screen() {
                    debug!(error = %e, "failed to clear screen");
                }
                Ok(true)
            }
            Flow::OpenForm => {
                self.run_prediction()?;
                Ok(true)
            }
            Flow::OpenHistory => {
                self.show_history();
                Ok(true)
            }
        }
    }

    /// Fill the form and submit it; `None` when the form was abandoned
    pub fn run_prediction(&mut self) -> Result<Option<Submission>> {
        self.display_manager.show_section("Form prediksi ISPA");
        self.display_manager
            .show_hint("Isi informasi di bawah ini untuk mendapatkan prediksi awal ISPA Anda.");

        let filled = PredictionForm::new(&mut self.input, &self.display_manager).fill()?;
        let Some(FormInput { identity, symptoms }) = filled else {
            self.display_manager.show_info("Form dibatalkan.");
            return Ok(None);
        };

        let mut transaction = PredictionTransaction::new(self.model.as_ref(), &self.history);
        let submission = match transaction.submit(&identity, &symptoms) {
            Ok(submission) => submission,
            Err(e) => {
                error!(error = %e, "prediction failed");
                self.display_manager.show_error(&format!("Prediksi gagal: {}", e));
                return Ok(None);
            }
        };

        match &submission {
            Submission::Rejected { warning } => self.display_manager.show_warning(warning),
            Submission::Completed(outcome) => {
                self.predictions += 1;
                self.display_manager.show_prediction(outcome);
            }
        }
        debug!(state = ?transaction.state(), "form submission handled");

        Ok(Some(submission))
    }

    /// Render the history view; read errors are shown, not propagated
    pub fn show_history(&self) -> Option<HistoryTable> {
        match HistoryView::new(&self.history).render() {
            Ok(table) => {
                self.display_manager.show_history(&table);
                Some(table)
            }
            Err(e) => {
                error!(error = %e, "failed to read history");
                self.display_manager
                    .show_error(&format!("Riwayat tidak dapat dibaca: {}", e));
                None
            }
        }
    }

    /// Completed predictions in this session
    pub fn prediction_count(&self) -> usize {
        self.predictions
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn input(&self) -> &S {
        &self.input
    }

    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }
}

impl<H: HistoryStore> ReplSession<InputHandler, H> {
    /// Persist the line editor's history
    pub fn save(&mut self) -> Result<()> {
        self.input.save_history()
    }
}

/// Configuration for REPL mode
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Line editor history (menu commands and form answers)
    pub input_history: Option<PathBuf>,
}

impl ReplConfig {
    pub fn with_history(path: PathBuf) -> Self {
        ReplConfig {
            input_history: Some(path),
        }
    }

    /// Standard location: ~/.ispa_history
    pub fn default_location() -> Self {
        match dirs::home_dir() {
            Some(home) => Self::with_history(home.join(".ispa_history")),
            None => Self::default(),
        }
    }

    pub fn input_handler(&self) -> Result<InputHandler> {
        match &self.input_history {
            Some(path) => InputHandler::with_history(path.clone()),
            None => InputHandler::new(),
        }
    }
}
