//! GMGN request execution.
//!
//! [`GmgnClient`] builds the endpoint URL and query-parameter set for
//! each read operation, mints a fresh randomized identity through
//! [`crate::identity`], issues the GET, and normalizes the outcome.
//! There is no retry or backoff; every failure is reported upward on
//! first occurrence as a [`TronwatchError`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, Utc};
use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GmgnConfig;
use crate::error::TronwatchError;
use crate::identity;
use crate::models::{
    BatchReport, Direction, TopTraders, TopTradersQuery, TopTradersReport, TradeQuery,
    TraderRecord,
};
use crate::Result;

/// Bounded per-request timeout; the remote specifies no deadline, but
/// an unbounded hang helps nobody.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Chain segment baked into both endpoint paths.
const CHAIN: &str = "tron";

const FROM_APP: &str = "gmgn";
const TZ_NAME: &str = "Asia/Shanghai";
const TZ_OFFSET: &str = "28800";
const APP_LANG: &str = "zh-CN";

/// Timestamp layout for `client_id`/`app_ver`, e.g. `2026.0807.153012`.
const STAMP_FORMAT: &str = "%Y.%m%d.%H%M%S";

/// Client for the GMGN read API.
///
/// Holds no connection state: every call mints a fresh identity and a
/// fresh HTTP client, so no two requests share a TLS fingerprint or
/// user-agent. Concurrent callers are fine; the only shared resource
/// is the optional output file, where the last writer wins.
pub struct GmgnClient {
    base_url: String,
    output_file: PathBuf,
}

impl GmgnClient {
    pub fn new(config: GmgnConfig) -> Self {
        GmgnClient {
            base_url: config.base_url,
            output_file: config.output_file,
        }
    }

    /// Fetches token trade history.
    ///
    /// The upstream body is returned verbatim; callers are expected to
    /// understand the upstream schema.
    ///
    /// # Errors
    ///
    /// [`TronwatchError::Status`] on a non-200 answer,
    /// [`TronwatchError::Transport`]/[`TronwatchError::Json`] on
    /// connection or decoding faults.
    pub async fn fetch_token_trades(&self, query: &TradeQuery) -> Result<Value> {
        let token = clean_token_address(&query.token_address);
        let url = format!("{}/api/v1/token_trades/{CHAIN}/{token}", self.base_url);
        let params = trade_params(query);

        self.get_json(&url, &params).await
    }

    /// Fetches the ranked traders of a token.
    ///
    /// Every upstream `data` item with a non-empty address becomes a
    /// [`TraderRecord`], upstream order preserved; items without one
    /// are skipped silently. When the query asks for persistence, the
    /// collected addresses are dumped one per line to the configured
    /// output file (reported via logs only).
    ///
    /// # Errors
    ///
    /// [`TronwatchError::InvalidData`] on a 200 body without a
    /// top-level `data` array, otherwise as
    /// [`fetch_token_trades`](Self::fetch_token_trades).
    pub async fn fetch_top_traders(&self, query: &TopTradersQuery) -> Result<TopTraders> {
        let token = clean_token_address(&query.token_address);
        let url = format!(
            "{}/defi/quotation/v1/tokens/top_traders/{CHAIN}/{token}",
            self.base_url
        );
        let params = top_traders_params(query);

        let body = self.get_json(&url, &params).await?;
        let items = body
            .get("data")
            .and_then(Value::as_array)
            .ok_or(TronwatchError::InvalidData)?;

        let traders: Vec<TraderRecord> = items.iter().filter_map(TraderRecord::from_item).collect();
        let payload = TopTraders::new(traders);

        if query.persist_to_file {
            self.persist_addresses(&payload);
        }

        Ok(payload)
    }

    /// Fetches top traders for several tokens concurrently.
    ///
    /// Always resolves to a [`BatchReport`]: per-token reports keyed by
    /// the address as given, aggregate status `success` when every
    /// token succeeded or `partial` with an `errors` list otherwise.
    pub async fn fetch_top_traders_batch(
        &self,
        addresses: &[String],
        limit: u32,
        orderby: &str,
        direction: Direction,
    ) -> BatchReport {
        if addresses.is_empty() {
            return BatchReport::empty_input();
        }

        let fetches = addresses.iter().map(|address| async move {
            let mut query = TopTradersQuery::new(address.clone());
            query.limit = limit;
            query.orderby = orderby.to_string();
            query.direction = direction;
            (address.clone(), self.fetch_top_traders(&query).await)
        });

        let mut errors = Vec::new();
        let mut results = BTreeMap::new();
        for (address, outcome) in join_all(fetches).await {
            if let Err(err) = &outcome {
                errors.push(format!("Error fetching data for {address}: {err}"));
            }
            results.insert(address, TopTradersReport::from(outcome));
        }

        BatchReport {
            status: if errors.is_empty() { "success" } else { "partial" },
            message: None,
            errors: if errors.is_empty() { None } else { Some(errors) },
            results,
        }
    }

    /// Issues one GET with a freshly minted identity and parses the body.
    async fn get_json(&self, url: &str, params: &[(&'static str, String)]) -> Result<Value> {
        let identity = identity::next_identity();
        debug!(
            profile = identity.profile.token,
            user_agent = identity.user_agent,
            url,
            "issuing request"
        );

        let client = identity.build_client(REQUEST_TIMEOUT)?;
        let response = client
            .get(url)
            .headers(identity.headers)
            .query(&params)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(TronwatchError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Writes one address per line to the configured output file,
    /// overwriting prior contents.
    ///
    /// A write failure is logged and swallowed; it does not change the
    /// operation result.
    fn persist_addresses(&self, payload: &TopTraders) {
        let mut lines = String::new();
        for trader in &payload.traders {
            lines.push_str(&trader.address);
            lines.push('\n');
        }

        match std::fs::write(&self.output_file, lines) {
            Ok(()) => info!(
                "Successfully saved {} trader addresses to {}",
                payload.count,
                self.output_file.display()
            ),
            Err(err) => warn!(
                "failed to write trader addresses to {}: {err}",
                self.output_file.display()
            ),
        }
    }
}

/// Strips any `?...` suffix a caller left on a token address.
pub fn clean_token_address(address: &str) -> &str {
    address.split('?').next().unwrap_or(address)
}

/// Per-request session parameters: a fresh device id plus the web-app
/// metadata GMGN's front-end sends, stamped at call time.
fn session_params() -> Vec<(&'static str, String)> {
    let stamp = Local::now().format(STAMP_FORMAT).to_string();
    vec![
        ("device_id", Uuid::new_v4().to_string()),
        ("client_id", format!("gmgn_web_{stamp}")),
        ("from_app", FROM_APP.to_string()),
        ("app_ver", stamp),
        ("tz_name", TZ_NAME.to_string()),
        ("tz_offset", TZ_OFFSET.to_string()),
        ("app_lang", APP_LANG.to_string()),
    ]
}

fn trade_params(query: &TradeQuery) -> Vec<(&'static str, String)> {
    let mut params = session_params();
    params.push(("limit", query.limit.to_string()));
    params.push(("maker", query.maker.clone().unwrap_or_default()));
    params.push(("from", query.from_timestamp.to_string()));
    params.push((
        "to",
        query
            .to_timestamp
            .unwrap_or_else(|| Utc::now().timestamp())
            .to_string(),
    ));
    if let Some(cursor) = &query.cursor {
        params.push(("cursor", cursor.clone()));
    }
    params
}

fn top_traders_params(query: &TopTradersQuery) -> Vec<(&'static str, String)> {
    let mut params = session_params();
    params.push(("limit", query.limit.to_string()));
    params.push(("orderby", query.orderby.clone()));
    params.push(("direction", query.direction.as_str().to_string()));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn question_mark_suffix_is_stripped() {
        assert_eq!(clean_token_address("TXYZabc?foo=1"), "TXYZabc");
        assert_eq!(clean_token_address("TXYZabc?foo=1&bar=2"), "TXYZabc");
        assert_eq!(clean_token_address("TXYZabc"), "TXYZabc");
        assert_eq!(clean_token_address("?foo=1"), "");
    }

    #[test]
    fn session_params_carry_fixed_app_metadata() {
        let params = session_params();
        assert_eq!(param(&params, "from_app"), Some("gmgn"));
        assert_eq!(param(&params, "tz_name"), Some("Asia/Shanghai"));
        assert_eq!(param(&params, "tz_offset"), Some("28800"));
        assert_eq!(param(&params, "app_lang"), Some("zh-CN"));
    }

    #[test]
    fn device_id_is_a_uuid() {
        let params = session_params();
        let device_id = param(&params, "device_id").unwrap();
        assert!(Uuid::parse_str(device_id).is_ok());
    }

    #[test]
    fn client_id_embeds_the_version_stamp() {
        let params = session_params();
        let client_id = param(&params, "client_id").unwrap();
        let app_ver = param(&params, "app_ver").unwrap();

        let stamp = client_id.strip_prefix("gmgn_web_").unwrap();
        assert_eq!(stamp, app_ver);

        // %Y.%m%d.%H%M%S
        assert_eq!(stamp.len(), 16);
        for (i, c) in stamp.char_indices() {
            if i == 4 || i == 9 {
                assert_eq!(c, '.');
            } else {
                assert!(c.is_ascii_digit(), "unexpected char {c:?} in {stamp}");
            }
        }
    }

    #[test]
    fn fresh_device_id_per_request() {
        let first = session_params();
        let second = session_params();
        assert_ne!(param(&first, "device_id"), param(&second, "device_id"));
    }

    #[test]
    fn trade_params_defaults() {
        let query = TradeQuery::new("TAddr");
        let params = trade_params(&query);

        assert_eq!(param(&params, "limit"), Some("100"));
        assert_eq!(param(&params, "maker"), Some(""));
        assert_eq!(param(&params, "from"), Some("0"));
        assert!(param(&params, "cursor").is_none());

        // "to" defaults to now, evaluated at call time.
        let to: i64 = param(&params, "to").unwrap().parse().unwrap();
        let now = Utc::now().timestamp();
        assert!((now - to).abs() < 5, "to={to} not near now={now}");
    }

    #[test]
    fn trade_params_carry_explicit_values() {
        let mut query = TradeQuery::new("TAddr");
        query.from_timestamp = 100;
        query.to_timestamp = Some(200);
        query.limit = 25;
        query.maker = Some("TMaker".to_string());
        query.cursor = Some("page-2".to_string());

        let params = trade_params(&query);
        assert_eq!(param(&params, "from"), Some("100"));
        assert_eq!(param(&params, "to"), Some("200"));
        assert_eq!(param(&params, "limit"), Some("25"));
        assert_eq!(param(&params, "maker"), Some("TMaker"));
        assert_eq!(param(&params, "cursor"), Some("page-2"));
    }

    #[test]
    fn top_traders_params_carry_ranking_knobs() {
        let mut query = TopTradersQuery::new("TAddr");
        query.limit = 50;
        query.direction = Direction::Asc;

        let params = top_traders_params(&query);
        assert_eq!(param(&params, "limit"), Some("50"));
        assert_eq!(param(&params, "orderby"), Some("profit"));
        assert_eq!(param(&params, "direction"), Some("asc"));
    }
}
