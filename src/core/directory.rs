//! Account directory
//!
//! This module provides the [`Directory`] that owns every [`Ledger`] keyed by
//! account name and tracks which one is selected. It is the only component
//! that touches the snapshot file.
//!
//! The Directory enforces:
//! - The selected name always refers to a loaded account
//! - Every mutation rewrites the snapshot after the ledger appended its history
//! - Selection changes never touch history files
//!
//! The history append and the snapshot rewrite are two separate writes. A crash
//! between them can leave the files disagreeing; nothing repairs that.

use crate::core::ledger::Ledger;
use crate::io::history_csv::{history_path, read_history, CsvHistoryLog};
use crate::io::snapshot::{AccountSettings, Snapshot, SnapshotStore};
use crate::types::{AccountConfig, BankrollError, ChangeReport, Money, Period, StakeQuote};
use chrono::TimeDelta;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the directory keeps its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Folder holding `state.json` and one `<name>.csv` per account
    pub data_dir: PathBuf,
}

impl DirectoryConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DirectoryConfig {
            data_dir: data_dir.into(),
        }
    }
}

/// All accounts plus the current selection
#[derive(Debug)]
pub struct Directory {
    data_dir: PathBuf,
    store: SnapshotStore,
    ledgers: BTreeMap<String, Ledger>,
    selected: String,
}

impl Directory {
    /// Load every account declared in the snapshot and replay its history
    ///
    /// # Arguments
    ///
    /// * `config` - Location of the data directory
    ///
    /// # Returns
    ///
    /// * `Ok(Directory)` - Fully replayed directory
    /// * `Err(BankrollError)` - The load failed as a whole; nothing is partially loaded
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The snapshot is missing or malformed (`IoError`, `SnapshotFormat`)
    /// - An account entry is unusable (`InvalidAccountConfig`)
    /// - The selected name is not a declared account (`InconsistentSelection`)
    /// - Any history row fails to replay (`CorruptHistoryRow`)
    pub fn load(config: &DirectoryConfig) -> Result<Self, BankrollError> {
        let store = SnapshotStore::in_dir(&config.data_dir);
        let snapshot = store.load()?;

        if !snapshot.accounts.contains_key(&snapshot.selected) {
            return Err(BankrollError::inconsistent_selection(&snapshot.selected));
        }

        let mut ledgers = BTreeMap::new();
        for (name, settings) in snapshot.accounts {
            let account = settings.into_config(&name)?;
            let ledger = open_ledger(&config.data_dir, account)?;
            ledgers.insert(name, ledger);
        }

        info!(
            "loaded {} account(s) from {}, selected '{}'",
            ledgers.len(),
            config.data_dir.display(),
            snapshot.selected
        );

        Ok(Directory {
            data_dir: config.data_dir.clone(),
            store,
            ledgers,
            selected: snapshot.selected,
        })
    }

    /// Create a fresh data directory holding a single, selected account
    ///
    /// An existing history file for the account is replayed, not discarded.
    ///
    /// # Errors
    ///
    /// - `AlreadyInitialized` if a snapshot already exists
    /// - `IoError` if the directory or snapshot cannot be written
    pub fn init(config: &DirectoryConfig, account: AccountConfig) -> Result<Self, BankrollError> {
        let store = SnapshotStore::in_dir(&config.data_dir);
        if store.exists() {
            return Err(BankrollError::AlreadyInitialized {
                path: store.path().display().to_string(),
            });
        }
        fs::create_dir_all(&config.data_dir)
            .map_err(|e| BankrollError::io_at(&config.data_dir, e))?;

        let name = account.name.clone();
        let ledger = open_ledger(&config.data_dir, account)?;
        let directory = Directory {
            data_dir: config.data_dir.clone(),
            store,
            ledgers: BTreeMap::from([(name.clone(), ledger)]),
            selected: name,
        };
        directory.save()?;

        info!(
            "initialized {} with account '{}'",
            config.data_dir.display(),
            directory.selected
        );
        Ok(directory)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// All account names in lexicographic order
    pub fn listing(&self) -> Vec<&str> {
        self.ledgers.keys().map(String::as_str).collect()
    }

    /// Name of the selected account
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn ledger(&self, name: &str) -> Option<&Ledger> {
        self.ledgers.get(name)
    }

    /// The selected account's ledger
    pub fn selected_ledger(&self) -> Result<&Ledger, BankrollError> {
        self.ledgers
            .get(&self.selected)
            .ok_or_else(|| BankrollError::inconsistent_selection(&self.selected))
    }

    fn selected_ledger_mut(&mut self) -> Result<&mut Ledger, BankrollError> {
        self.ledgers
            .get_mut(&self.selected)
            .ok_or_else(|| BankrollError::inconsistent_selection(&self.selected))
    }

    /// Make `name` the selected account and persist the choice
    ///
    /// # Errors
    ///
    /// - `UnknownAccount` if no such account exists; the selection is unchanged
    /// - `IoError` if the snapshot cannot be rewritten; the selection is restored
    pub fn select(&mut self, name: &str) -> Result<(), BankrollError> {
        if !self.ledgers.contains_key(name) {
            return Err(BankrollError::unknown_account(name));
        }

        info!("select '{name}'");
        let previous = std::mem::replace(&mut self.selected, name.to_string());
        if let Err(e) = self.save() {
            self.selected = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Overwrite the selected account's balance, then persist the snapshot
    pub fn set_balance(&mut self, text: &str) -> Result<Money, BankrollError> {
        let balance = self.selected_ledger_mut()?.set_balance(text)?;
        self.save()?;
        Ok(balance)
    }

    /// Apply a signed delta to the selected account, then persist the snapshot
    pub fn apply_transaction(&mut self, text: &str) -> Result<Money, BankrollError> {
        let balance = self.selected_ledger_mut()?.apply_transaction(text)?;
        self.save()?;
        Ok(balance)
    }

    pub fn current_balance(&self) -> Result<Option<Money>, BankrollError> {
        Ok(self.selected_ledger()?.current_balance())
    }

    pub fn stakes(&self) -> Result<Option<StakeQuote>, BankrollError> {
        self.selected_ledger()?.stakes()
    }

    pub fn change_over(&self, window: TimeDelta) -> Result<Option<ChangeReport>, BankrollError> {
        self.selected_ledger()?.change_over(window)
    }

    pub fn change(&self, period: Period) -> Result<Option<ChangeReport>, BankrollError> {
        self.selected_ledger()?.change(period)
    }

    /// Current settings and selection in their persisted form
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            accounts: self
                .ledgers
                .iter()
                .map(|(name, ledger)| (name.clone(), AccountSettings::from(ledger.config())))
                .collect(),
            selected: self.selected.clone(),
        }
    }

    fn save(&self) -> Result<(), BankrollError> {
        self.store.save(&self.snapshot())
    }
}

/// Replay an account's history and attach its CSV log
fn open_ledger(data_dir: &Path, account: AccountConfig) -> Result<Ledger, BankrollError> {
    let path = history_path(data_dir, &account.name);
    let history = read_history(&path, &account)?;
    Ok(Ledger::with_history(
        account,
        history,
        Box::new(CsvHistoryLog::new(path)),
    ))
}
