//! Query types for the two read operations.

use clap::ValueEnum;

/// Sort direction for trader rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Returns the wire-format value expected by the GMGN API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Parameters for a token-trades fetch.
#[derive(Debug, Clone)]
pub struct TradeQuery {
    /// Token contract address; any `?...` suffix is stripped before use.
    pub token_address: String,
    pub from_timestamp: i64,
    /// Resolved to the current unix time at call time when `None`.
    pub to_timestamp: Option<i64>,
    pub limit: u32,
    /// Trader wallet filter; sent as an empty string when absent.
    pub maker: Option<String>,
    /// Opaque pagination token, passed through when present.
    pub cursor: Option<String>,
}

impl TradeQuery {
    pub fn new(token_address: impl Into<String>) -> Self {
        TradeQuery {
            token_address: token_address.into(),
            from_timestamp: 0,
            to_timestamp: None,
            limit: 100,
            maker: None,
            cursor: None,
        }
    }
}

/// Parameters for a top-traders fetch.
#[derive(Debug, Clone)]
pub struct TopTradersQuery {
    /// Token contract address; any `?...` suffix is stripped before use.
    pub token_address: String,
    pub limit: u32,
    pub orderby: String,
    pub direction: Direction,
    /// Dump the collected addresses to the configured file on success.
    pub persist_to_file: bool,
}

impl TopTradersQuery {
    pub fn new(token_address: impl Into<String>) -> Self {
        TopTradersQuery {
            token_address: token_address.into(),
            limit: 100,
            orderby: "profit".to_string(),
            direction: Direction::Desc,
            persist_to_file: false,
        }
    }
}
