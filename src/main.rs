//! ISPA Predict - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use ispa_predict::{
    cli::{Args, Commands, Config},
    history::{CsvHistoryStore, HistoryView},
    logging,
    model::LoadedModel,
    repl::{DisplayManager, ReplConfig, ReplSession},
};
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbosity());

    let mut config = Config::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if !config.display.color_output {
        colored::control::set_override(false);
    }

    match args.command() {
        Commands::Start => run_repl(&config)?,
        Commands::History => show_history(&config)?,
        Commands::Config => show_config(&config)?,
    }

    Ok(())
}

/// Load the model artifacts or exit; no page renders without them
fn require_model(config: &Config) -> Arc<LoadedModel> {
    let store = config.model_store();
    match store.load() {
        Ok(model) => model,
        Err(e) => {
            tracing::error!(error = %e, "model artifacts unavailable");
            eprintln!("{} {}", "Error:".red().bold(), e);
            eprintln!(
                "File model atau encoder tidak ditemukan. Pastikan '{}' dan '{}' tersedia.",
                store.model_path().display(),
                store.encoder_path().display()
            );
            std::process::exit(2);
        }
    }
}

fn run_repl(config: &Config) -> Result<()> {
    let model = require_model(config);

    let input = ReplConfig::default_location().input_handler()?;
    let history = CsvHistoryStore::new(config.history_path());
    let mut session = ReplSession::new(input, model, history);

    session.show_welcome(&format!("v{}", VERSION));

    if let Err(e) = session.run() {
        // Ctrl-C ends the session like /exit
        tracing::debug!(error = %e, "session ended");
    }

    if let Err(e) = session.save() {
        eprintln!("{}: Could not save input history: {}", "Warning".yellow(), e);
    }

    Ok(())
}

fn show_history(config: &Config) -> Result<()> {
    require_model(config);
    let store = CsvHistoryStore::new(config.history_path());
    let table = HistoryView::new(&store).render()?;
    DisplayManager::new().show_history(&table);
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    let source = match Config::default_path() {
        Some(path) if path.exists() => path.display().to_string(),
        _ => "built-in defaults".to_string(),
    };

    println!("{}", "ISPA Predict Configuration".bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    println!("  Source:         {}", source.dimmed());
    println!("  Model:          {}", config.model_path().display().to_string().green());
    println!("  Label encoder:  {}", config.encoder_path().display().to_string().green());
    println!("  History file:   {}", config.history_path().display().to_string().green());
    println!(
        "  Color output:   {}",
        if config.display.color_output { "On".green() } else { "Off".red() }
    );
    println!();
    Ok(())
}
