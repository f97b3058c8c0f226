//! Configuration snapshot
//!
//! A single JSON file, `state.json`, declares every account and remembers which
//! one is selected:
//!
//! ```json
//! {
//! 	"accounts": {
//! 		"main": {
//! 			"buy_ins": 30,
//! 			"currency": "$",
//! 			"precision": 2
//! 		}
//! 	},
//! 	"selected": "main"
//! }
//! ```
//!
//! Keys are written in sorted order with tab indentation so that diffs of the
//! file stay readable. The file is rewritten in full on every mutation, through
//! a temporary file renamed over the old one.
//!
//! The serde types here are the persistence mapping only. They are converted to
//! and from [`AccountConfig`] at this boundary.

use crate::types::{AccountConfig, BankrollError};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the snapshot inside the data directory
pub const SNAPSHOT_FILE: &str = "state.json";

/// Settings of one account as stored in the snapshot
///
/// Fields are declared in alphabetical order, which is the order serde writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSettings {
    pub buy_ins: u32,
    pub currency: String,
    pub precision: u32,
}

impl AccountSettings {
    /// Validate these settings into a typed account configuration
    pub fn into_config(self, name: &str) -> Result<AccountConfig, BankrollError> {
        AccountConfig::new(name, self.currency, self.precision, self.buy_ins)
    }
}

impl From<&AccountConfig> for AccountSettings {
    fn from(config: &AccountConfig) -> Self {
        AccountSettings {
            buy_ins: config.buy_ins,
            currency: config.currency.clone(),
            precision: config.precision,
        }
    }
}

/// Whole snapshot file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub accounts: BTreeMap<String, AccountSettings>,
    pub selected: String,
}

/// Reads and rewrites the snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store for the snapshot inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        SnapshotStore {
            path: data_dir.join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the snapshot
    ///
    /// # Errors
    ///
    /// - `IoError` if the file cannot be read
    /// - `SnapshotFormat` if it is not a valid snapshot document
    pub fn load(&self) -> Result<Snapshot, BankrollError> {
        let text =
            fs::read_to_string(&self.path).map_err(|e| BankrollError::io_at(&self.path, e))?;
        let snapshot = serde_json::from_str(&text)
            .map_err(|e| BankrollError::snapshot_format(&self.path, e.to_string()))?;
        debug!("loaded snapshot from {}", self.path.display());
        Ok(snapshot)
    }

    /// Rewrite the snapshot in full
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), BankrollError> {
        let contents = render(snapshot)
            .map_err(|e| BankrollError::snapshot_format(&self.path, e.to_string()))?;

        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, contents).map_err(|e| BankrollError::io_at(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| BankrollError::io_at(&self.path, e))?;

        debug!("saved snapshot to {}", self.path.display());
        Ok(())
    }
}

/// Serialize with sorted keys, tab indentation and a trailing newline
pub fn render(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"\t"));
    snapshot.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}
