//! JSON result shapes written to stdout.
//!
//! Every operation resolves to one of these unions, so callers can
//! always parse stdout as a single JSON document regardless of
//! outcome.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::models::trader::{TopTraders, TraderRecord};

/// Shaped outcome of a top-traders fetch.
///
/// Failure keeps the `traders` field (always empty) so consumers that
/// expect a list never hit a missing key.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TopTradersReport {
    Success {
        count: usize,
        traders: Vec<TraderRecord>,
    },
    Error {
        message: String,
        traders: Vec<TraderRecord>,
    },
}

impl From<crate::Result<TopTraders>> for TopTradersReport {
    fn from(result: crate::Result<TopTraders>) -> Self {
        match result {
            Ok(payload) => TopTradersReport::Success {
                count: payload.count,
                traders: payload.traders,
            },
            Err(err) => TopTradersReport::Error {
                message: err.to_string(),
                traders: Vec::new(),
            },
        }
    }
}

/// Shaped outcome of a trades fetch: the upstream body verbatim on
/// success, `{"error": ...}` on failure.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TradesReport {
    Success(Value),
    Error { error: String },
}

impl From<crate::Result<Value>> for TradesReport {
    fn from(result: crate::Result<Value>) -> Self {
        match result {
            Ok(body) => TradesReport::Success(body),
            Err(err) => TradesReport::Error {
                error: err.to_string(),
            },
        }
    }
}

/// Aggregate of a multi-token top-traders fetch.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    /// `success` when every token succeeded, `partial` when some
    /// failed, `error` when the input was unusable.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub results: BTreeMap<String, TopTradersReport>,
}

impl BatchReport {
    /// Report for an empty address list.
    pub fn empty_input() -> Self {
        BatchReport {
            status: "error",
            message: Some("No token addresses provided".to_string()),
            errors: None,
            results: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TronwatchError;
    use serde_json::json;

    #[test]
    fn success_report_shape() {
        let traders = vec![TraderRecord::from_item(&json!({"address": "Txxx", "profit": 5})).unwrap()];
        let report = TopTradersReport::from(Ok(TopTraders::new(traders)));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["count"], 1);
        assert_eq!(value["traders"][0]["address"], "Txxx");
        assert_eq!(value["traders"][0]["profit"], 5.0);
        assert_eq!(value["traders"][0]["profit_usd"], 0.0);
        assert_eq!(value["traders"][0]["buy_count"], 0);
    }

    #[test]
    fn failure_report_keeps_empty_trader_list() {
        let report = TopTradersReport::from(Err::<TopTraders, _>(TronwatchError::Status(500)));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "HTTP Error: 500");
        assert_eq!(value["traders"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn trades_success_is_verbatim() {
        let body = json!({"code": 0, "data": {"history": []}});
        let report = TradesReport::from(Ok(body.clone()));
        assert_eq!(serde_json::to_value(&report).unwrap(), body);
    }

    #[test]
    fn trades_failure_is_error_object() {
        let report = TradesReport::from(Err(TronwatchError::Status(500)));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, json!({"error": "HTTP Error: 500"}));
    }

    #[test]
    fn empty_batch_input_report() {
        let report = BatchReport::empty_input();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "No token addresses provided");
        assert!(value.get("errors").is_none());
        assert!(value["results"].as_object().unwrap().is_empty());
    }
}
