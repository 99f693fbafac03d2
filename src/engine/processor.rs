//! Command Processor
//!
//! Turns one line of text such as `buy AAPL 150.00 100` into a trade book
//! update and a message for the user.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::errors::CommandError;
use super::store::{TradeBookStore, TradeOutcome};
use super::validation::TradeValidator;

/// Parses, validates and records trade commands
#[derive(Debug)]
pub struct CommandProcessor {
    validator: TradeValidator,
    store: TradeBookStore,
}

impl CommandProcessor {
    pub fn new(validator: TradeValidator, store: TradeBookStore) -> Self {
        Self { validator, store }
    }

    pub fn validator(&self) -> &TradeValidator {
        &self.validator
    }

    pub fn store(&self) -> &TradeBookStore {
        &self.store
    }

    /// Execute a command and return the typed outcome
    ///
    /// # Steps
    /// 1. Split on whitespace; exactly four tokens are required
    /// 2. Parse price as a decimal and volume as an integer
    /// 3. Validate the trade
    /// 4. Merge it into the trade book
    ///
    /// Price tokens accept everything `Decimal::from_str` does, including
    /// `1e2`, `.5`, a leading `+` and `_` digit separators. Volume tokens
    /// follow `i64` parsing: a sign is allowed, `_` is not.
    ///
    /// # Arguments
    /// * `command` - One raw line such as `buy AAPL 150.00 100`
    ///
    /// # Returns
    /// * `Ok(TradeOutcome)` once the order is merged and persisted
    /// * `Err(CommandError)` for the first format, validation or store failure
    pub fn execute(&mut self, command: &str) -> Result<TradeOutcome, CommandError> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        let [action, stock_code, price, volume] = parts.as_slice() else {
            return Err(CommandError::InvalidFormat);
        };

        let price = Decimal::from_str(price).map_err(|_| CommandError::InvalidNumber)?;
        let volume = volume
            .parse::<i64>()
            .map_err(|_| CommandError::InvalidNumber)?;

        let order = self
            .validator
            .validate_trade(action, stock_code, price, volume)?;

        Ok(self.store.process(&order)?)
    }

    /// Execute a command and render the result as a user-facing message
    pub fn process(&mut self, command: &str) -> String {
        match self.execute(command) {
            Ok(outcome) => outcome.to_string(),
            Err(e) if e.is_format_error() => {
                tracing::debug!("Malformed command '{}': {}", command.trim(), e);
                e.to_string()
            }
            Err(e) if e.is_validation_error() => {
                tracing::debug!("Rejected order '{}': {}", command.trim(), e);
                e.to_string()
            }
            Err(e) => {
                tracing::error!("Failed to record trade '{}': {}", command.trim(), e);
                e.to_string()
            }
        }
    }
}
