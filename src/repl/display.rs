//! Display manager for the terminal UI
//!
//! Color-coded output for the menu, the prediction result and the
//! history table.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use std::io;

use crate::history::view::{COLUMNS, EMPTY_NOTICE};
use crate::history::HistoryTable;
use crate::prediction::{percent, PredictionOutcome};

/// Shown when no other category reaches the threshold
pub const NO_OTHER_NOTICE: &str = "Tidak ada kemungkinan lain yang signifikan (>1%).";

/// Display manager for the terminal UI
pub struct DisplayManager {
    width: usize,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager { width: 64 }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, classes: &[String]) {
        let rule = "=".repeat(self.width);
        println!("\n{}", rule.cyan());
        println!("{}", format!("  Sistem Prediksi ISPA {}", version).bold().cyan());
        println!("{}", format!("  Kategori: {}", classes.join(", ")).dimmed());
        println!("{}\n", rule.cyan());
        self.show_menu();
    }

    /// Navigation menu
    pub fn show_menu(&self) {
        println!("{}", "Navigasi Menu".bold());
        println!("  {} Form prediksi     ({})", "1)".cyan(), "/predict".green());
        println!("  {} Riwayat prediksi  ({})", "2)".cyan(), "/history".green());
        println!(
            "\nType {} for commands, {} to quit\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Render a completed prediction
    pub fn show_prediction(&self, outcome: &PredictionOutcome) {
        self.show_section("Hasil prediksi Anda");

        if outcome.negative {
            println!("{}", headline(outcome).green().bold());
            println!(
                "{} {} untuk {}.",
                "Probabilitas:".cyan(),
                outcome.probability_percent().bold(),
                outcome.label().bold()
            );
            println!("Tetap jaga kesehatan dan kebersihan diri ya!");
            println!("\n{}", outcome.advice);
        } else {
            println!("{}", headline(outcome).red().bold());
            println!(
                "{} {} untuk {}.",
                "Probabilitas:".cyan(),
                outcome.probability_percent().bold(),
                outcome.label().bold()
            );
            println!("\n{}", "Probabilitas untuk kemungkinan lainnya:".bold());
            for line in other_lines(outcome) {
                println!("  {} {}", "•".cyan(), line);
            }

            self.show_section("Saran Penanganan Awal");
            println!("{}", outcome.advice);
        }
        println!();
    }

    /// Render the history table or the empty notice
    pub fn show_history(&self, table: &HistoryTable) {
        self.show_section("Semua Riwayat prediksi Pengguna");

        if table.is_empty() {
            self.show_warning(EMPTY_NOTICE);
            return;
        }

        let mut lines = format_table(table).into_iter();
        if let Some(header) = lines.next() {
            println!("{}", header.bold());
        }
        for line in lines {
            println!("{}", line);
        }
        println!();
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Field help text
    pub fn show_hint(&self, hint: &str) {
        println!("  {}", hint.dimmed());
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(self.width).cyan());
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Result headline addressed to the user
pub fn headline(outcome: &PredictionOutcome) -> String {
    if outcome.negative {
        format!(
            "Selamat, {}! Berdasarkan gejala yang Anda masukkan, kemungkinan besar Anda TIDAK mengalami ISPA.",
            outcome.name
        )
    } else {
        format!(
            "Perhatian, {}! Berdasarkan gejala Anda, kemungkinan besar Anda mengalami ISPA jenis: {}",
            outcome.name,
            outcome.label()
        )
    }
}

/// "label: NN%" lines for the other significant categories
pub fn other_lines(outcome: &PredictionOutcome) -> Vec<String> {
    if outcome.others.is_empty() {
        return vec![NO_OTHER_NOTICE.to_string()];
    }
    outcome
        .others
        .iter()
        .map(|o| format!("{}: {}", o.label, percent(o.probability)))
        .collect()
}

/// Header plus one padded line per entry
pub fn format_table(table: &HistoryTable) -> Vec<String> {
    let rows: Vec<[String; 6]> = table.entries().iter().map(|e| e.cells()).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let pad = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![pad(COLUMNS.to_vec())];
    for row in &rows {
        lines.push(pad(row.iter().map(String::as_str).collect()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::view::build_table;
    use crate::history::{HistoryRecord, HistoryRow};
    use crate::model::{LabelProbability, Prediction};
    use chrono::NaiveDate;

    fn outcome(label: &str, negative: bool, others: Vec<LabelProbability>) -> PredictionOutcome {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        PredictionOutcome {
            name: "Ani".to_string(),
            prediction: Prediction {
                index: 0,
                label: label.to_string(),
                probability: 0.75,
                probabilities: vec![],
            },
            others,
            advice: "Istirahat.".to_string(),
            negative,
            record: HistoryRecord::new("Ani", "Perempuan", 20, label, 0.75, at),
            persisted: true,
        }
    }

    #[test]
    fn test_headline_positive() {
        let text = headline(&outcome("Pneumonia", false, vec![]));
        assert!(text.starts_with("Perhatian, Ani!"));
        assert!(text.ends_with("ISPA jenis: Pneumonia"));
    }

    #[test]
    fn test_headline_negative() {
        let text = headline(&outcome("Tidak ISPA", true, vec![]));
        assert!(text.starts_with("Selamat, Ani!"));
        assert!(text.contains("TIDAK"));
    }

    #[test]
    fn test_other_lines() {
        let others = vec![
            LabelProbability { label: "Bronkitis".to_string(), probability: 0.1 },
            LabelProbability { label: "Rinitis".to_string(), probability: 0.02 },
        ];
        assert_eq!(
            other_lines(&outcome("Pneumonia", false, others)),
            vec!["Bronkitis: 10%", "Rinitis: 2%"]
        );
        assert_eq!(other_lines(&outcome("Pneumonia", false, vec![])), vec![NO_OTHER_NOTICE]);
    }

    #[test]
    fn test_format_table_alignment() {
        let table = build_table(vec![HistoryRow {
            name: "Dewi".to_string(),
            gender: "Perempuan".to_string(),
            age: "29".to_string(),
            predicted_label: "Faringitis".to_string(),
            probability: "0.64".to_string(),
            timestamp: "2024-04-02 10:00:00".to_string(),
        }]);
        let lines = format_table(&table);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Waktu"));
        assert!(lines[1].starts_with("2024-04-02 10:00:00"));
        assert!(lines[1].ends_with("64%"));
        assert_eq!(lines[0].find("Nama"), lines[1].find("Dewi"));
    }

    #[test]
    fn test_message_display() {
        let manager = DisplayManager::new();
        manager.show_error("Test error");
        manager.show_warning("Test warning");
        manager.show_info("Test info");
        manager.show_hint("Test hint");
        manager.show_prediction(&outcome("Pneumonia", false, vec![]));
        manager.show_prediction(&outcome("Tidak ISPA", true, vec![]));
        manager.show_history(&HistoryTable::Empty);
    }
}
