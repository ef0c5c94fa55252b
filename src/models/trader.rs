//! Trader ranking models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One ranked trader extracted from the upstream `data` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderRecord {
    pub address: String,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub profit_usd: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub volume_usd: f64,
    #[serde(default)]
    pub buy_count: u64,
    #[serde(default)]
    pub sell_count: u64,
}

impl TraderRecord {
    /// Builds a record from one upstream item.
    ///
    /// Returns `None` when the item carries no non-empty `address`;
    /// missing or malformed numeric fields become 0.
    pub fn from_item(item: &Value) -> Option<TraderRecord> {
        let address = item.get("address")?.as_str()?;
        if address.is_empty() {
            return None;
        }

        Some(TraderRecord {
            address: address.to_string(),
            profit: float_field(item, "profit"),
            profit_usd: float_field(item, "profit_usd"),
            volume: float_field(item, "volume"),
            volume_usd: float_field(item, "volume_usd"),
            buy_count: count_field(item, "buy_count"),
            sell_count: count_field(item, "sell_count"),
        })
    }
}

fn float_field(item: &Value, key: &str) -> f64 {
    item.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn count_field(item: &Value, key: &str) -> u64 {
    item.get(key).and_then(Value::as_u64).unwrap_or(0)
}

/// Successful top-traders payload.
///
/// `count` always equals `traders.len()`; construct through [`new`](Self::new).
#[derive(Debug, Clone, Serialize)]
pub struct TopTraders {
    pub count: usize,
    pub traders: Vec<TraderRecord>,
}

impl TopTraders {
    pub fn new(traders: Vec<TraderRecord>) -> Self {
        TopTraders {
            count: traders.len(),
            traders,
        }
    }
}
