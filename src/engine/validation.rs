//! Trade validation functions
//!
//! This module provides centralized validation for incoming trade orders
//! before they reach the trade book. Rules are evaluated in a fixed order and
//! the first failure wins, so the reported message is deterministic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{TradeAction, TradeOrder};

use super::errors::ValidationError;
use super::registry::StockCodeRegistry;

/// Lowest accepted price
pub const MIN_PRICE: Decimal = dec!(0.50);

/// Maximum number of fractional digits a price may carry
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Accepted volume range for a single order (inclusive)
pub const MIN_VOLUME: i64 = 1;
pub const MAX_VOLUME: i64 = 1_000_000;

/// Length of every stock code
pub const STOCK_CODE_LEN: usize = 4;

// ============================================================================
// Individual Validation Functions
// ============================================================================

/// Action must be exactly "buy" or "sell"
pub fn is_valid_action(action: &str) -> bool {
    action.parse::<TradeAction>().is_ok()
}

/// Stock code must be exactly four uppercase ASCII letters
///
/// This checks the format only; registry membership is checked by
/// [`TradeValidator::validate_stock_code`].
pub fn is_valid_stock_code_format(stock_code: &str) -> bool {
    stock_code.len() == STOCK_CODE_LEN && stock_code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Price must be at least [`MIN_PRICE`] with no more than two fractional digits
///
/// `1.50`, `1.5` and `1.500` are all accepted; `1.505` is not.
pub fn is_valid_price(price: Decimal) -> bool {
    price >= MIN_PRICE && price.round_dp(PRICE_DECIMAL_PLACES) == price
}

/// Volume must be within [`MIN_VOLUME`]..=[`MAX_VOLUME`]
pub fn is_valid_volume(volume: i64) -> bool {
    (MIN_VOLUME..=MAX_VOLUME).contains(&volume)
}

// ============================================================================
// Composite Validation
// ============================================================================

/// Validates trade parameters against the business rules
///
/// Owns the [`StockCodeRegistry`] used for code membership checks.
#[derive(Debug, Clone)]
pub struct TradeValidator {
    registry: StockCodeRegistry,
}

impl TradeValidator {
    pub fn new(registry: StockCodeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StockCodeRegistry {
        &self.registry
    }

    /// Format check first, then registry membership
    pub fn validate_stock_code(&self, stock_code: &str) -> bool {
        is_valid_stock_code_format(stock_code) && self.registry.is_valid(stock_code)
    }

    /// Validate all four fields and build a typed order
    ///
    /// # Validations Performed
    /// 1. Action is "buy" or "sell"
    /// 2. Stock code is well-formed and registered
    /// 3. Price is >= 0.50 with at most two decimal places
    /// 4. Volume is between 1 and 1,000,000
    ///
    /// # Arguments
    /// * `action` - Raw action token
    /// * `stock_code` - Raw stock code token
    /// * `price` - Parsed price
    /// * `volume` - Parsed volume, possibly negative
    ///
    /// # Returns
    /// * `Ok(TradeOrder)` if every rule passes
    /// * `Err(ValidationError)` for the first rule that fails
    pub fn validate_trade(
        &self,
        action: &str,
        stock_code: &str,
        price: Decimal,
        volume: i64,
    ) -> Result<TradeOrder, ValidationError> {
        let action = action
            .parse::<TradeAction>()
            .map_err(|_| ValidationError::InvalidAction)?;

        if !self.validate_stock_code(stock_code) {
            return Err(ValidationError::InvalidStockCode);
        }

        if !is_valid_price(price) {
            return Err(ValidationError::InvalidPrice);
        }

        if !is_valid_volume(volume) {
            return Err(ValidationError::InvalidVolume);
        }

        let volume = u64::try_from(volume).map_err(|_| ValidationError::InvalidVolume)?;

        Ok(TradeOrder {
            action,
            stock_code: stock_code.to_string(),
            price,
            volume,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
