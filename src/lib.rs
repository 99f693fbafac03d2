// Library Crate Root
// lib.rs

// main.rs imports everything through here like an external crate
pub mod config;
pub mod engine;
pub mod models;
pub mod modes;

// pub use = re-export at crate root
pub use config::BrokerConfig;
pub use engine::{
    CliError, CommandError, CommandProcessor, StockCodeRegistry, StoreError, TradeBookStore,
    TradeOutcome, TradeValidator, ValidationError,
};
pub use models::{TradeAction, TradeKey, TradeOrder, TradeRecord};
