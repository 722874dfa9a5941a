//! The storage adapter for the ledger file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, ledger::Transaction};

/// Reads and writes the whole transaction collection as a single JSON file.
///
/// Loading is fail-open: an absent or unparseable file yields an empty
/// collection, and the next successful write replaces whatever was on disk.
/// "Never had data" and "had corrupt data" are deliberately
/// indistinguishable.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    /// Create a storage adapter for the ledger file at `path`.
    ///
    /// The file is not opened or created until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted collection, in storage order.
    pub fn load(&self) -> Vec<Transaction> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                tracing::warn!(
                    "could not read ledger file {}, starting empty: {error}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::warn!(
                    "ledger file {} is not a valid transaction list, starting empty: {error}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted collection.
    ///
    /// The new contents are written to a temporary sibling file and renamed
    /// into place, so a crash mid-write cannot leave a torn ledger.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(transactions)
            .map_err(|error| Error::LedgerWrite(error.to_string()))?;

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, json).map_err(|error| Error::LedgerWrite(error.to_string()))?;
        fs::rename(&tmp_path, &self.path).map_err(|error| Error::LedgerWrite(error.to_string()))?;

        Ok(())
    }
}
