//! Command parsing for the navigation menu
//!
//! Accepts `/`-prefixed commands and the menu numbers `1` and `2`.

use colored::*;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Predict,
    History,
    Help,
    Clear,
    Exit,
    Unknown { input: String },
}

/// What the session should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    OpenForm,
    OpenHistory,
    ClearScreen,
    Exit,
}

/// Command handler for parsing and executing menu commands
#[derive(Debug, Default)]
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let word = match trimmed.strip_prefix('/') {
            Some(rest) => rest.split_whitespace().next().unwrap_or(""),
            None => trimmed,
        };

        match word.to_lowercase().as_str() {
            "1" | "predict" | "p" | "prediksi" | "form" => Command::Predict,
            "2" | "history" | "riwayat" | "r" => Command::History,
            "help" | "h" => Command::Help,
            "clear" | "cls" => Command::Clear,
            "exit" | "quit" | "q" => Command::Exit,
            _ => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    /// Execute the commands that need no model or store
    pub fn execute(&self, command: &Command) -> Flow {
        match command {
            Command::Predict => Flow::OpenForm,
            Command::History => Flow::OpenHistory,
            Command::Help => {
                self.show_help();
                Flow::Continue
            }
            Command::Clear => Flow::ClearScreen,
            Command::Exit => {
                println!("{}", "Sampai jumpa!".green());
                Flow::Exit
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Flow::Continue
            }
        }
    }

    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("1, /predict, /p", "Fill in the prediction form"),
            ("2, /history, /riwayat", "Show all past predictions, newest first"),
            ("/help, /h", "Show this help message"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<24} {}", cmd.green(), desc);
        }

        println!("\n{}", "Form:".bold());
        println!("  - Press {} to keep a field's default value", "Enter".cyan());
        println!("  - Press {} to abandon the form", "Ctrl-D".cyan());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/predict"), Command::Predict);
        assert_eq!(handler.parse("/p"), Command::Predict);
        assert_eq!(handler.parse("1"), Command::Predict);
    }

    #[test]
    fn test_parse_history() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/history"), Command::History);
        assert_eq!(handler.parse(" /Riwayat "), Command::History);
        assert_eq!(handler.parse("2"), Command::History);
    }

    #[test]
    fn test_parse_exit() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/exit"), Command::Exit);
        assert_eq!(handler.parse("/quit"), Command::Exit);
        assert_eq!(handler.parse("/q"), Command::Exit);
    }

    #[test]
    fn test_parse_clear() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/clear"), Command::Clear);
        assert_eq!(handler.parse("/cls"), Command::Clear);
    }

    #[test]
    fn test_parse_unknown() {
        let handler = CommandHandler::new();
        match handler.parse("/diagnose") {
            Command::Unknown { input } => assert!(input.contains("diagnose")),
            other => panic!("Expected Unknown command, got {:?}", other),
        }
        assert!(matches!(handler.parse("/"), Command::Unknown { .. }));
        assert!(matches!(handler.parse("3"), Command::Unknown { .. }));
    }

    #[test]
    fn test_execute_flow() {
        let handler = CommandHandler::new();
        assert_eq!(handler.execute(&Command::Predict), Flow::OpenForm);
        assert_eq!(handler.execute(&Command::History), Flow::OpenHistory);
        assert_eq!(handler.execute(&Command::Help), Flow::Continue);
        assert_eq!(handler.execute(&Command::Clear), Flow::ClearScreen);
        assert_eq!(handler.execute(&Command::Exit), Flow::Exit);
        assert_eq!(
            handler.execute(&Command::Unknown { input: "x".to_string() }),
            Flow::Continue
        );
    }
}
