//! Tick feed processing.
//!
//! Turns inbound feed messages into `PriceTick`s and keeps the bounded
//! price/digit history the detector reads from.

pub mod config;
pub mod error;
pub mod parser;
pub mod price_history;

pub use config::HistoryConfig;
pub use error::{FeedError, FeedResult};
pub use parser::{PriceTick, TickParser};
pub use price_history::PriceHistory;
