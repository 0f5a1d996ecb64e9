//! CSV-backed history store
//!
//! The whole file is the database: one header row, then one record per
//! line in insertion order. Appends are neither atomic nor locked.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::history::{HistoryRecord, HistoryRow, HistoryStore};

/// History store writing to a single CSV file
#[derive(Debug, Clone)]
pub struct CsvHistoryStore {
    path: PathBuf,
}

impl CsvHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The header is written when the file is missing or empty
    fn needs_header(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true)
    }
}

impl HistoryStore for CsvHistoryStore {
    fn append(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let write_header = self.needs_header();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        debug!(path = %self.path.display(), header = write_header, "history record appended");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<HistoryRow>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for (line, result) in reader.deserialize::<HistoryRow>().enumerate() {
            match result {
                Ok(row) => rows.push(row),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!(path = %self.path.display(), row = line + 1, error = %e, "skipping unreadable history row");
                }
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_HEADER;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (CsvHistoryStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvHistoryStore::new(temp_dir.path().join("riwayat_prediksi.csv"));
        (store, temp_dir)
    }

    fn record(name: &str, minute: u32) -> HistoryRecord {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap();
        HistoryRecord::new(name, "Perempuan", 25, "Faringitis", 0.6789, at)
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_first_append_writes_header() {
        let (store, _temp) = create_test_store();
        store.append(&record("Ani", 1)).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), HISTORY_HEADER.join(","));
        assert_eq!(lines.next().unwrap(), "Ani,Perempuan,25,Faringitis,0.68,2024-05-01 10:01:00");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_later_appends_skip_header() {
        let (store, _temp) = create_test_store();
        store.append(&record("Ani", 1)).unwrap();
        store.append(&record("Budi", 2)).unwrap();
        store.append(&record("Citra", 3)).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.lines().count(), 4);
        assert_eq!(contents.matches("Nama").count(), 1);
    }

    #[test]
    fn test_round_trip() {
        let (store, _temp) = create_test_store();
        let written = record("Dewi Lestari", 7);
        store.append(&written).unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, written.name);
        assert_eq!(row.gender, written.gender);
        assert_eq!(row.age, written.age.to_string());
        assert_eq!(row.predicted_label, written.predicted_label);
        assert_eq!(row.probability_value(), Some(0.68));
        assert_eq!(row.timestamp, written.timestamp);
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let (store, _temp) = create_test_store();
        store.append(&record("Putra, S.Kom", 1)).unwrap();
        let rows = store.read_all().unwrap();
        assert_eq!(rows[0].name, "Putra, S.Kom");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (store, _temp) = create_test_store();
        store.append(&record("Late", 30)).unwrap();
        store.append(&record("Early", 1)).unwrap();

        let names: Vec<String> = store.read_all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Late", "Early"]);
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvHistoryStore::new(temp_dir.path().join("data").join("riwayat.csv"));
        store.append(&record("Ani", 1)).unwrap();
        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_probability_row_is_still_read() {
        let (store, _temp) = create_test_store();
        store.append(&record("Ani", 1)).unwrap();
        let mut contents = fs::read_to_string(store.path()).unwrap();
        contents.push_str("Rusak,Laki-laki,50,Pneumonia,N/A,2024-05-01 11:00:00\n");
        fs::write(store.path(), contents).unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].probability, "N/A");
    }

    #[test]
    fn test_torn_row_is_skipped() {
        let (store, _temp) = create_test_store();
        store.append(&record("Ani", 1)).unwrap();
        let mut contents = fs::read_to_string(store.path()).unwrap();
        contents.push_str("Budi,Laki-la\n");
        fs::write(store.path(), contents).unwrap();
        store.append(&record("Citra", 2)).unwrap();

        let names: Vec<String> = store.read_all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Ani", "Citra"]);
    }

    #[test]
    fn test_empty_file_gets_header() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "").unwrap();
        store.append(&record("Ani", 1)).unwrap();
        assert_eq!(store.read_all().unwrap().len(), 1);
    }
}
