//! Pending trade tracking.
//!
//! Each signal opens a trade that collects the next `ticks_per_trade`
//! prices and is then judged against a barrier band around its start
//! price: WIN if every collected price stays inside, LOSS otherwise.

pub mod barrier;
pub mod config;
pub mod error;
pub mod queue;

pub use barrier::Barriers;
pub use config::TradeConfig;
pub use error::TradeError;
pub use queue::TradeQueue;
