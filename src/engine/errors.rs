//! Error types for trade book operations
//!
//! Every user-visible failure is a variant here. The `Display` text of a
//! variant is exactly the message printed back to the user, so the command
//! processor can return `err.to_string()` without further formatting.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::TradeKey;

/// Business-rule failures raised by the trade validator
///
/// Variants are listed in the order the rules are evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid action. Must be 'buy' or 'sell'.")]
    InvalidAction,

    /// Raised both for a malformed code and for one missing from the registry
    #[error("Invalid stock code. Must be 4 uppercase letters and exist in stockcode.csv.")]
    InvalidStockCode,

    #[error("Invalid price. Must be a number with 2 decimal places and >= 0.50.")]
    InvalidPrice,

    #[error("Invalid volume. Must be between 1 and 1,000,000.")]
    InvalidVolume,
}

/// Failures of the persisted trade book
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the orders file failed
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the orders file could not be parsed
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Aggregated volume no longer fits in a u64
    #[error("Volume overflow for {key}")]
    VolumeOverflow { key: TradeKey },
}

/// Failures of a single text command
///
/// The first two variants are format errors detected before validation.
/// `InvalidNumber` covers a bad price token and a bad volume token alike.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid command. Format: [buy|sell] [STOCKCODE] [PRICE] [VOLUME]")]
    InvalidFormat,

    #[error("Invalid command. Price must be a decimal number and volume must be an integer.")]
    InvalidNumber,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error: {0}")]
    Store(#[from] StoreError),
}

impl CommandError {
    /// Returns true for malformed input (wrong token count or unparsable numbers)
    pub fn is_format_error(&self) -> bool {
        matches!(self, CommandError::InvalidFormat | CommandError::InvalidNumber)
    }

    /// Returns true if a business rule rejected the order
    pub fn is_validation_error(&self) -> bool {
        matches!(self, CommandError::Validation(_))
    }
}

/// Errors surfaced by the binary entry point and the batch/interactive adapters
#[derive(Debug, Error)]
pub enum CliError {
    /// The trade book could not be opened at startup
    #[error("Failed to open trade book: {0}")]
    Store(#[from] StoreError),

    /// Writing to the output stream failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::InvalidAction.to_string(),
            "Invalid action. Must be 'buy' or 'sell'."
        );
        assert!(ValidationError::InvalidStockCode
            .to_string()
            .starts_with("Invalid stock code"));
        assert!(ValidationError::InvalidPrice
            .to_string()
            .starts_with("Invalid price"));
        assert_eq!(
            ValidationError::InvalidVolume.to_string(),
            "Invalid volume. Must be between 1 and 1,000,000."
        );
    }

    #[test]
    fn test_command_error_wraps_validation_verbatim() {
        let err: CommandError = ValidationError::InvalidPrice.into();
        assert_eq!(err.to_string(), ValidationError::InvalidPrice.to_string());
        assert!(err.is_validation_error());
        assert!(!err.is_format_error());
    }

    #[test]
    fn test_command_error_categories() {
        assert!(CommandError::InvalidFormat.is_format_error());
        assert!(CommandError::InvalidNumber.is_format_error());

        let store = CommandError::from(StoreError::MalformedRecord {
            line: 3,
            reason: "expected 4 fields, found 2".to_string(),
        });
        assert!(!store.is_format_error());
        assert_eq!(
            store.to_string(),
            "Error: Malformed record on line 3: expected 4 fields, found 2"
        );
    }

    #[test]
    fn test_cli_error_display_is_human_readable() {
        let err = CliError::from(StoreError::MalformedRecord {
            line: 2,
            reason: "invalid price 'oops'".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to open trade book: Malformed record on line 2: invalid price 'oops'"
        );
        assert!(!err.to_string().contains("MalformedRecord"));
    }
}
