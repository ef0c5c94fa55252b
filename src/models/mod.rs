//! Request and response models for the GMGN read operations.
//!
//! Queries carry the caller-facing knobs with their defaults; trader
//! records are extracted tolerantly from upstream items; reports are
//! the exact JSON shapes written to stdout.

pub mod query;
pub mod report;
pub mod trader;

pub use query::{Direction, TopTradersQuery, TradeQuery};
pub use report::{BatchReport, TopTradersReport, TradesReport};
pub use trader::{TopTraders, TraderRecord};
