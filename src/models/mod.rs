pub mod trade_record;

pub use trade_record::{TradeAction, TradeKey, TradeOrder, TradeRecord};
