use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Trade action: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    /// Lowercase text form used on the command line and in the orders file
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = String;

    /// Exact lowercase match only: "Buy" and "BUY" are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Identity of a trade book entry
///
/// Two entries with the same key are merged by summing volume. `Decimal`
/// compares numerically, so `150.0` and `150.00` produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradeKey {
    pub action: TradeAction,
    pub stock_code: String,
    pub price: Decimal,
}

impl TradeKey {
    pub fn new(action: TradeAction, stock_code: &str, price: Decimal) -> Self {
        Self {
            action,
            stock_code: stock_code.to_string(),
            price,
        }
    }
}

impl fmt::Display for TradeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {:.2}", self.action, self.stock_code, self.price)
    }
}

/// A validated incoming order, ready to be merged into the trade book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOrder {
    pub action: TradeAction,
    pub stock_code: String,
    pub price: Decimal,
    pub volume: u64,
}

impl TradeOrder {
    /// Identity this order merges into
    pub fn key(&self) -> TradeKey {
        TradeKey::new(self.action, &self.stock_code, self.price)
    }
}

/// One aggregated position in the trade book
///
/// `volume` is the running total of every accepted order sharing this
/// record's [`TradeKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRecord {
    pub action: TradeAction,
    pub stock_code: String,
    pub price: Decimal,
    pub volume: u64,
}

impl TradeRecord {
    /// Create a new record
    pub fn new(action: TradeAction, stock_code: String, price: Decimal, volume: u64) -> Self {
        Self {
            action,
            stock_code,
            price,
            volume,
        }
    }

    /// Extract the identity key (volume excluded)
    pub fn key(&self) -> TradeKey {
        TradeKey::new(self.action, &self.stock_code, self.price)
    }

    /// Check whether this record has the given identity
    pub fn matches(&self, key: &TradeKey) -> bool {
        self.action == key.action && self.stock_code == key.stock_code && self.price == key.price
    }

    /// Serialize into the `action,stock_code,price,volume` line format
    ///
    /// Price is always rendered with exactly two fractional digits.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{:.2},{}",
            self.action, self.stock_code, self.price, self.volume
        )
    }

    /// Parse a record from its `action,stock_code,price,volume` line format
    ///
    /// Surrounding whitespace on the line and on each field is ignored.
    ///
    /// # Arguments
    /// * `line` - One line of the orders file, without or with its newline
    ///
    /// # Returns
    /// * `Ok(TradeRecord)` if all four fields parse
    /// * `Err(String)` with a human-readable reason otherwise
    pub fn from_csv_line(line: &str) -> Result<Self, String> {
        let parts: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 fields, found {}", parts.len()));
        }

        let action = parts[0].parse::<TradeAction>()?;
        let price = Decimal::from_str(parts[2])
            .map_err(|e| format!("invalid price '{}': {}", parts[2], e))?;
        let volume = parts[3]
            .parse::<u64>()
            .map_err(|e| format!("invalid volume '{}': {}", parts[3], e))?;

        Ok(Self::new(action, parts[1].to_string(), price, volume))
    }
}

impl From<TradeOrder> for TradeRecord {
    fn from(order: TradeOrder) -> Self {
        Self::new(order.action, order.stock_code, order.price, order.volume)
    }
}
