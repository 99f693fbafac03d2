//! Trade Book Engine Module
//!
//! This module contains the core stockbroker functionality:
//! - `errors` - Error types for every layer
//! - `registry` - Set of tradable stock codes
//! - `validation` - Trade validation rules
//! - `store` - Aggregated trade book with write-through persistence
//! - `processor` - Text command parsing and dispatch

pub mod errors;
pub mod processor;
pub mod registry;
pub mod store;
pub mod validation;

// Re-export commonly used types for convenience
pub use errors::{CliError, CommandError, StoreError, ValidationError};
pub use processor::CommandProcessor;
pub use registry::StockCodeRegistry;
pub use store::{TradeBookStore, TradeOutcome};
pub use validation::TradeValidator;
