//! Trade Book Store
//!
//! This module provides the `TradeBookStore` struct which keeps the aggregated
//! trade records in memory and mirrors them to a flat orders file.
//!
//! Every successful mutation is written through to disk before `process`
//! returns. If the write fails the in-memory change is undone, so memory and
//! disk always agree.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::{TradeKey, TradeOrder, TradeRecord};

use super::errors::StoreError;

/// Result of merging one order into the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// No record had the order's identity; a new one was appended
    Added,
    /// The order's volume was added to an existing record
    Updated,
}

impl TradeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            TradeOutcome::Added => "Trade book added.",
            TradeOutcome::Updated => "Trade book updated.",
        }
    }
}

impl std::fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// File Helpers
// ============================================================================

/// Parse the orders file contents
///
/// Blank lines are skipped. Any malformed line fails the whole parse.
fn parse_records(text: &str) -> Result<Vec<TradeRecord>, StoreError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            TradeRecord::from_csv_line(line).map_err(|reason| StoreError::MalformedRecord {
                line: idx + 1,
                reason,
            })
        })
        .collect()
}

fn write_records(path: &Path, records: &[TradeRecord]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    for record in records {
        writeln!(writer, "{}", record.to_csv_line())?;
    }
    writer.flush()
}

// ============================================================================
// Store
// ============================================================================

/// Aggregated trade book backed by a flat file
#[derive(Debug)]
pub struct TradeBookStore {
    path: PathBuf,
    records: Vec<TradeRecord>,
}

impl TradeBookStore {
    /// Open the store at `path`, loading any existing records
    ///
    /// A missing file yields an empty store. A malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.into(),
            records: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory records with the contents of the orders file
    pub fn load(&mut self) -> Result<(), StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    "Orders file {} does not exist yet; starting empty",
                    self.path.display()
                );
                self.records.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        self.records = parse_records(&text)?;
        tracing::debug!(
            "Loaded {} trade records from {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Overwrite the orders file with every record, in insertion order
    ///
    /// Missing parent directories are created.
    pub fn save(&self) -> Result<(), StoreError> {
        write_records(&self.path, &self.records).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(
            "Saved {} trade records to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Find the record with the given identity
    pub fn find(&self, key: &TradeKey) -> Option<&TradeRecord> {
        self.records.iter().find(|r| r.matches(key))
    }

    /// Merge an order into the book and persist the result
    ///
    /// # Returns
    /// * `Ok(TradeOutcome::Updated)` if a record with the same identity existed
    /// * `Ok(TradeOutcome::Added)` if a new record was appended
    /// * `Err(StoreError)` if the aggregate overflowed or the file write failed;
    ///   the book is left exactly as it was before the call
    pub fn process(&mut self, order: &TradeOrder) -> Result<TradeOutcome, StoreError> {
        let key = order.key();

        match self.records.iter().position(|r| r.matches(&key)) {
            Some(idx) => {
                let previous = self.records[idx].volume;
                let total = previous
                    .checked_add(order.volume)
                    .ok_or_else(|| StoreError::VolumeOverflow { key: key.clone() })?;

                self.records[idx].volume = total;
                if let Err(e) = self.save() {
                    self.records[idx].volume = previous;
                    return Err(e);
                }

                tracing::info!("Updated {} volume {} -> {}", key, previous, total);
                Ok(TradeOutcome::Updated)
            }
            None => {
                self.records.push(TradeRecord::from(order.clone()));
                if let Err(e) = self.save() {
                    self.records.pop();
                    return Err(e);
                }

                tracing::info!("Added {} volume {}", key, order.volume);
                Ok(TradeOutcome::Added)
            }
        }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
