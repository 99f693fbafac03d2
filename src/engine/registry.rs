//! Stock code registry
//!
//! Holds the fixed set of tradable stock codes, loaded once at startup from a
//! newline-delimited list. A missing or unreadable list is not fatal: the
//! registry comes up empty and flags itself as degraded, so every code is
//! rejected until the list is fixed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Read-only set of valid stock codes
#[derive(Debug, Clone, Default)]
pub struct StockCodeRegistry {
    codes: HashSet<String>,
    source: Option<PathBuf>,
    degraded: bool,
}

impl StockCodeRegistry {
    /// Load codes from a file, one per line
    ///
    /// Lines are trimmed and blank lines skipped. If the file cannot be read
    /// the registry is empty and [`is_degraded`](Self::is_degraded) returns true.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let mut registry = Self::from_text(&text);
                registry.source = Some(path.to_path_buf());
                tracing::debug!(
                    "Loaded {} stock codes from {}",
                    registry.len(),
                    path.display()
                );
                registry
            }
            Err(e) => {
                tracing::warn!(
                    "Stock code file '{}' could not be read ({}); no stock code will validate",
                    path.display(),
                    e
                );
                Self {
                    codes: HashSet::new(),
                    source: Some(path.to_path_buf()),
                    degraded: true,
                }
            }
        }
    }

    /// Build a registry from newline-delimited text
    pub fn from_text(text: &str) -> Self {
        Self::from_codes(text.lines())
    }

    /// Build a registry from an iterator of codes
    ///
    /// Entries are trimmed; empty entries are ignored.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            codes,
            source: None,
            degraded: false,
        }
    }

    /// Exact, case-sensitive membership check
    pub fn is_valid(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// True when the source could not be read and the registry fell back to empty
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Path the registry was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
