//! History view: filtered, newest-first table of past predictions

use tracing::debug;

use crate::errors::Result;
use crate::history::{HistoryRow, HistoryStore};

/// Notice shown when there is nothing to list
pub const EMPTY_NOTICE: &str =
    "Belum ada data prediksi yang tersimpan. Silakan gunakan 'Form prediksi' terlebih dahulu.";

/// Column titles, in display order
pub const COLUMNS: [&str; 6] = [
    "Waktu",
    "Nama",
    "Jenis Kelamin",
    "Usia",
    "prediksi",
    "Probabilitas",
];

/// One displayable history line
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub name: String,
    pub gender: String,
    pub age: String,
    pub predicted_label: String,
    pub probability: f64,
}

impl HistoryEntry {
    /// Probability as a whole percentage, e.g. `75%`
    pub fn probability_percent(&self) -> String {
        format!("{:.0}%", self.probability * 100.0)
    }

    /// Cells in `COLUMNS` order
    pub fn cells(&self) -> [String; 6] {
        [
            self.timestamp.clone(),
            self.name.clone(),
            self.gender.clone(),
            self.age.clone(),
            self.predicted_label.clone(),
            self.probability_percent(),
        ]
    }

    fn from_row(row: HistoryRow) -> Option<Self> {
        let probability = row.probability_value()?;
        Some(Self {
            timestamp: row.timestamp,
            name: row.name,
            gender: row.gender,
            age: row.age,
            predicted_label: row.predicted_label,
            probability,
        })
    }
}

/// Result of rendering the history
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryTable {
    Empty,
    Rows(Vec<HistoryEntry>),
}

impl HistoryTable {
    pub fn len(&self) -> usize {
        match self {
            HistoryTable::Empty => 0,
            HistoryTable::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        match self {
            HistoryTable::Empty => &[],
            HistoryTable::Rows(rows) => rows,
        }
    }
}

/// Drop rows with unusable probabilities and order newest first
///
/// Timestamps are fixed-width and zero-padded, so string order is time
/// order. The sort is stable: equal timestamps keep insertion order.
pub fn build_table(rows: Vec<HistoryRow>) -> HistoryTable {
    let total = rows.len();
    let mut entries: Vec<HistoryEntry> = rows.into_iter().filter_map(HistoryEntry::from_row).collect();

    if entries.len() < total {
        debug!(dropped = total - entries.len(), "history rows with unreadable probability hidden");
    }

    if entries.is_empty() {
        return HistoryTable::Empty;
    }

    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    HistoryTable::Rows(entries)
}

/// Renders the history table from a store
pub struct HistoryView<'a, H: HistoryStore + ?Sized> {
    store: &'a H,
}

impl<'a, H: HistoryStore + ?Sized> HistoryView<'a, H> {
    pub fn new(store: &'a H) -> Self {
        Self { store }
    }

    /// Read everything from the store and build the display table
    pub fn render(&self) -> Result<HistoryTable> {
        let rows = self.store.read_all()?;
        Ok(build_table(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, probability: &str, timestamp: &str) -> HistoryRow {
        HistoryRow {
            name: name.to_string(),
            gender: "Perempuan".to_string(),
            age: "33".to_string(),
            predicted_label: "Rinitis".to_string(),
            probability: probability.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(build_table(vec![]), HistoryTable::Empty);
    }

    #[test]
    fn test_all_malformed_is_empty() {
        let table = build_table(vec![row("A", "N/A", "2024-01-01 00:00:00")]);
        assert_eq!(table, HistoryTable::Empty);
        assert!(table.is_empty());
    }

    #[test]
    fn test_sorted_newest_first() {
        let table = build_table(vec![
            row("Middle", "0.5", "2024-02-01 08:00:00"),
            row("Oldest", "0.5", "2023-12-31 23:59:59"),
            row("Newest", "0.5", "2024-02-01 08:00:01"),
        ]);
        let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn test_malformed_rows_dropped() {
        let table = build_table(vec![
            row("Good", "0.91", "2024-01-01 00:00:00"),
            row("Bad", "N/A", "2024-01-02 00:00:00"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].name, "Good");
    }

    #[test]
    fn test_percent_formatting() {
        let table = build_table(vec![row("A", "0.75", "2024-01-01 00:00:00")]);
        let entry = &table.entries()[0];
        assert_eq!(entry.probability_percent(), "75%");
        assert_eq!(entry.cells()[5], "75%");
        assert_eq!(entry.cells()[0], "2024-01-01 00:00:00");
    }

    #[test]
    fn test_percent_rounds() {
        let table = build_table(vec![
            row("A", "1", "2024-01-01 00:00:00"),
            row("B", "0.004", "2024-01-01 00:00:01"),
        ]);
        let percents: Vec<String> = table.entries().iter().map(|e| e.probability_percent()).collect();
        assert_eq!(percents, vec!["0%", "100%"]);
    }
}
