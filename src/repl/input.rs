//! Input handler for the REPL using rustyline
//!
//! Provides readline editing and persistent command history. Form fields
//! and menu commands are read through the same `LineSource` seam so the
//! whole session can be driven from a script in tests.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Anything that can answer a prompt with one line of text
pub trait LineSource {
    /// Returns:
    /// - Ok(Some(line)) for normal input (trimmed)
    /// - Ok(None) for EOF
    /// - Err on interrupt or other errors
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Read a form answer, which is never kept in the editor history
    fn read_field(&mut self, prompt: &str) -> Result<Option<String>> {
        self.read_line(prompt)
    }
}

/// Input handler managing the readline interface and its history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            history_path: None,
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
        })
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }

    fn read(&mut self, prompt: &str, record: bool) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if record && !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Err(anyhow::anyhow!("Interrupted")),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }
}

impl LineSource for InputHandler {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.read(prompt, true)
    }

    fn read_field(&mut self, prompt: &str) -> Result<Option<String>> {
        self.read(prompt, false)
    }
}

/// Pre-recorded answers, consumed in order; EOF once exhausted
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    recorded: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            recorded: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Lines that would have entered the editor history
    pub fn recorded(&self) -> &[String] {
        &self.recorded
    }

    fn take_next(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().map(|l| l.trim().to_string())
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let line = self.take_next(prompt);
        if let Some(l) = line.as_ref().filter(|l| !l.is_empty()) {
            self.recorded.push(l.clone());
        }
        Ok(line)
    }

    fn read_field(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self.take_next(prompt))
    }
}
