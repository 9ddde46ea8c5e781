use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Monetary amount - uses Decimal for precision
pub type Amount = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Bot identifier (stable, human readable, e.g. "trader-alpha")
pub type BotId = String;
