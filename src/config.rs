use std::path::PathBuf;

/// Environment variable naming the stock code list
pub const STOCKCODE_FILE_ENV: &str = "STOCKCODE_FILE";

/// Environment variable naming the orders file
pub const ORDERS_FILE_ENV: &str = "ORDERS_FILE";

pub const DEFAULT_STOCKCODE_FILE: &str = "data/stockcode.csv";
pub const DEFAULT_ORDERS_FILE: &str = "data/orders.csv";

/// File locations used by the broker
///
/// Built once in `main` and handed to the registry and store constructors;
/// nothing below `main` reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    /// Newline-delimited list of valid stock codes
    pub stock_codes_path: PathBuf,

    /// Persisted trade book
    pub orders_path: PathBuf,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            stock_codes_path: PathBuf::from(DEFAULT_STOCKCODE_FILE),
            orders_path: PathBuf::from(DEFAULT_ORDERS_FILE),
        }
    }
}

impl BrokerConfig {
    /// Read paths from `STOCKCODE_FILE` / `ORDERS_FILE`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            stock_codes_path: get(STOCKCODE_FILE_ENV, DEFAULT_STOCKCODE_FILE),
            orders_path: get(ORDERS_FILE_ENV, DEFAULT_ORDERS_FILE),
        }
    }

    /// Apply explicit overrides (e.g. from command-line flags)
    pub fn with_overrides(
        mut self,
        stock_codes_path: Option<PathBuf>,
        orders_path: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = stock_codes_path {
            self.stock_codes_path = path;
        }
        if let Some(path) = orders_path {
            self.orders_path = path;
        }
        self
    }
}
