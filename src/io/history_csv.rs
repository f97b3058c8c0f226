//! CSV history log
//!
//! Each account has one header-less CSV file, `<name>.csv`, holding one row per
//! balance snapshot:
//!
//! ```text
//! 2024-03-01T12:00:00+00:00,1500.00
//! 2024-03-01T12:05:41+00:00,1449.75
//! ```
//!
//! The file is only ever appended to. At load it is replayed in full, and any
//! row that does not parse, or whose balance is more precise than the account,
//! fails the whole load with `CorruptHistoryRow`.

use crate::core::traits::HistoryLog;
use crate::types::{AccountConfig, BankrollError, HistoryRecord, Money};
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::debug;
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Raw history row as stored on disk
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HistoryRow {
    pub timestamp: String,
    pub balance: String,
}

/// Path of an account's history file inside the data directory
pub fn history_path(data_dir: &Path, account: &str) -> PathBuf {
    data_dir.join(format!("{account}.csv"))
}

/// Convert a raw row into a history record at the given precision
///
/// # Returns
///
/// * `Ok(HistoryRecord)` - Successfully converted record
/// * `Err(String)` - Description of what is wrong with the row
pub fn convert_history_row(row: &HistoryRow, precision: u32) -> Result<HistoryRecord, String> {
    let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
        .map_err(|e| format!("invalid timestamp '{}': {}", row.timestamp, e))?
        .with_timezone(&Utc);

    let balance = Money::parse(&row.balance)
        .and_then(|money| money.quantize(precision))
        .map_err(|e| e.to_string())?;

    Ok(HistoryRecord::new(timestamp, balance))
}

/// Render a record as the two CSV fields written to disk
pub fn format_history_row(record: &HistoryRecord) -> [String; 2] {
    [
        record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
        record.balance.to_string(),
    ]
}

/// Replay an account's history file
///
/// A missing file is an account that has never recorded a balance.
///
/// # Errors
///
/// - `CorruptHistoryRow` with the 1-based line of the first bad row
/// - `IoError` if the file exists but cannot be read
pub fn read_history(
    path: &Path,
    account: &AccountConfig,
) -> Result<Vec<HistoryRecord>, BankrollError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{}: no history at {}", account.name, path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(BankrollError::io_at(path, e)),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut history = Vec::new();
    let mut line = 0;
    for result in reader.records() {
        line += 1;
        let record = result.map_err(|e| {
            let line = e.position().map_or(line, |pos| pos.line());
            BankrollError::corrupt_history_row(&account.name, line, e.to_string())
        })?;
        let line = record.position().map_or(line, |pos| pos.line());

        let entry = parse_record(&record, account.precision)
            .map_err(|message| BankrollError::corrupt_history_row(&account.name, line, message))?;
        history.push(entry);
    }

    debug!(
        "{}: replayed {} history rows from {}",
        account.name,
        history.len(),
        path.display()
    );
    Ok(history)
}

fn parse_record(record: &StringRecord, precision: u32) -> Result<HistoryRecord, String> {
    if record.len() != 2 {
        return Err(format!("expected 2 fields, found {}", record.len()));
    }
    let row: HistoryRow = record.deserialize(None).map_err(|e| e.to_string())?;
    convert_history_row(&row, precision)
}

/// History log appending to an account's CSV file
#[derive(Debug, Clone)]
pub struct CsvHistoryLog {
    path: PathBuf,
}

impl CsvHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvHistoryLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryLog for CsvHistoryLog {
    /// Append one row, creating the file on first use
    fn append(&mut self, record: &HistoryRecord) -> Result<(), BankrollError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| BankrollError::io_at(&self.path, e))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .write_record(format_history_row(record))
            .map_err(|e| BankrollError::io_at(&self.path, e))?;
        writer
            .flush()
            .map_err(|e| BankrollError::io_at(&self.path, e))?;

        debug!("appended history row to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Helper function to create a temporary history file for testing
    fn create_temp_history(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn main_config() -> AccountConfig {
        AccountConfig::new("main", "$", 2, 30).unwrap()
    }

    fn row(timestamp: &str, balance: &str) -> HistoryRow {
        HistoryRow {
            timestamp: timestamp.to_string(),
            balance: balance.to_string(),
        }
    }

    #[test]
    fn test_history_path_uses_account_name() {
        assert_eq!(
            history_path(Path::new("/data"), "main"),
            PathBuf::from("/data/main.csv")
        );
    }

    #[rstest]
    #[case::utc("2024-03-01T12:00:00+00:00", "1500", 150000)]
    #[case::offset("2024-03-01T13:00:00+01:00", "1449.75", 144975)]
    #[case::zulu("2024-03-01T12:00:00Z", "-3.5", -350)]
    fn test_convert_history_row_valid(
        #[case] timestamp: &str,
        #[case] balance: &str,
        #[case] minor: i128,
    ) {
        let record = convert_history_row(&row(timestamp, balance), 2).unwrap();
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(record.balance, Money::from_minor(minor, 2));
    }

    #[rstest]
    #[case::bad_timestamp("yesterday", "10", "invalid timestamp")]
    #[case::bad_balance("2024-03-01T12:00:00+00:00", "ten", "Malformed number")]
    #[case::too_precise("2024-03-01T12:00:00+00:00", "10.001", "exceeds the account precision")]
    fn test_convert_history_row_errors(
        #[case] timestamp: &str,
        #[case] balance: &str,
        #[case] expected_error: &str,
    ) {
        let err = convert_history_row(&row(timestamp, balance), 2).unwrap_err();
        assert!(err.contains(expected_error), "{err}");
    }

    #[test]
    fn test_format_history_row() {
        let record = HistoryRecord::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            Money::from_minor(144975, 2),
        );
        assert_eq!(
            format_history_row(&record),
            [
                "2024-03-01T12:00:00+00:00".to_string(),
                "1449.75".to_string()
            ]
        );
    }

    #[test]
    fn test_read_history_in_file_order() {
        let file = create_temp_history(
            "2024-03-01T12:00:00+00:00,1500\n\
             2024-03-01T12:05:00+00:00, 1449.75\n",
        );

        let history = read_history(file.path(), &main_config()).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].balance, Money::from_minor(150000, 2));
        assert_eq!(history[1].balance, Money::from_minor(144975, 2));
    }

    #[test]
    fn test_read_history_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let history = read_history(&dir.path().join("main.csv"), &main_config()).unwrap();
        assert!(history.is_empty());
    }

    #[rstest]
    #[case::bad_balance("2024-03-01T12:00:00+00:00,1500\n2024-03-01T12:05:00+00:00,abc\n", 2)]
    #[case::too_precise("2024-03-01T12:00:00+00:00,1500.123\n", 1)]
    #[case::missing_field("2024-03-01T12:00:00+00:00,1500\n2024-03-01T12:05:00+00:00\n", 2)]
    #[case::extra_field("2024-03-01T12:00:00+00:00,1500,x\n", 1)]
    fn test_read_history_rejects_corrupt_rows(#[case] content: &str, #[case] line: u64) {
        let file = create_temp_history(content);

        let err = read_history(file.path(), &main_config()).unwrap_err();

        match err {
            BankrollError::CorruptHistoryRow {
                account, line: l, ..
            } => {
                assert_eq!(account, "main");
                assert_eq!(l, line);
            }
            other => panic!("expected CorruptHistoryRow, got {other:?}"),
        }
    }

    #[test]
    fn test_append_then_read_back() {
        let dir = TempDir::new().unwrap();
        let path = history_path(dir.path(), "main");
        let mut log = CsvHistoryLog::new(&path);
        let first = HistoryRecord::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            Money::from_minor(150000, 2),
        );
        let second = HistoryRecord::new(
            Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap(),
            Money::from_minor(-2500, 2),
        );

        log.append(&first).unwrap();
        log.append(&second).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "2024-03-01T12:00:00+00:00,1500.00\n2024-03-02T08:30:00+00:00,-25.00\n"
        );
        assert_eq!(
            read_history(&path, &main_config()).unwrap(),
            vec![first, second]
        );
    }

    #[test]
    fn test_append_fails_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let mut log = CsvHistoryLog::new(dir.path().join("absent").join("main.csv"));
        let record = HistoryRecord::new(Utc::now(), Money::zero(2));

        assert!(matches!(
            log.append(&record),
            Err(BankrollError::IoError { .. })
        ));
    }
}
