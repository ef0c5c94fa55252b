//! GMGN API client CLI for Tron.
//!
//! Writes exactly one JSON document to stdout per invocation; all
//! diagnostics go to stderr. Unknown or missing commands exit with
//! code 1 and still produce a parseable JSON error body.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use tronwatch::client::GmgnClient;
use tronwatch::config::fetch_config;
use tronwatch::models::{Direction, TopTradersQuery, TopTradersReport, TradeQuery, TradesReport};

#[derive(Parser)]
#[command(name = "tronwatch", about = "GMGN API client for Tron")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Get top traders for a token
    #[command(name = "get_top_traders")]
    GetTopTraders {
        /// Token contract address
        token_address: String,
        /// Maximum number of traders to return
        #[arg(long, default_value_t = 100)]
        limit: u32,
        /// Field to order results by
        #[arg(long, default_value = "profit")]
        orderby: String,
        /// Sort direction
        #[arg(long, value_enum, default_value = "desc")]
        direction: Direction,
        /// Save trader addresses to a file
        #[arg(long)]
        save: bool,
    },
    /// Fetch token trades
    #[command(name = "fetch_token_trades")]
    FetchTokenTrades {
        /// Token contract address
        token_address: String,
        /// Start timestamp
        #[arg(long = "from", default_value_t = 0)]
        from_timestamp: i64,
        /// End timestamp (defaults to now)
        #[arg(long = "to")]
        to_timestamp: Option<i64>,
        /// Number of records to return
        #[arg(long, default_value_t = 100)]
        limit: u32,
        /// Trader wallet address
        #[arg(long)]
        maker: Option<String>,
    },
    /// Get top traders for several tokens in one call
    #[command(name = "get_multiple_top_traders")]
    GetMultipleTopTraders {
        /// Token contract addresses
        token_addresses: Vec<String>,
        /// Maximum number of traders to return per token
        #[arg(long, default_value_t = 5)]
        limit: u32,
        /// Field to order results by
        #[arg(long, default_value = "profit")]
        orderby: String,
        /// Sort direction
        #[arg(long, value_enum, default_value = "desc")]
        direction: Direction,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            emit(&json!({"status": "error", "message": "Unknown command"}));
            return ExitCode::from(1);
        }
    };

    let Some(command) = cli.command else {
        eprintln!("Unknown command");
        emit(&json!({"status": "error", "message": "Unknown command"}));
        return ExitCode::from(1);
    };

    let config = fetch_config();
    let client = GmgnClient::new(config.gmgn);

    match command {
        Command::GetTopTraders {
            token_address,
            limit,
            orderby,
            direction,
            save,
        } => {
            let mut query = TopTradersQuery::new(token_address);
            query.limit = limit;
            query.orderby = orderby;
            query.direction = direction;
            query.persist_to_file = save;

            let result = client.fetch_top_traders(&query).await;
            if let Err(err) = &result {
                error!("Error getting top traders data: {err}");
            }
            emit(&TopTradersReport::from(result));
        }
        Command::FetchTokenTrades {
            token_address,
            from_timestamp,
            to_timestamp,
            limit,
            maker,
        } => {
            let mut query = TradeQuery::new(token_address);
            query.from_timestamp = from_timestamp;
            query.to_timestamp = to_timestamp;
            query.limit = limit;
            query.maker = maker;

            let result = client.fetch_token_trades(&query).await;
            if let Err(err) = &result {
                error!("Error getting token trade data: {err}");
            }
            emit(&TradesReport::from(result));
        }
        Command::GetMultipleTopTraders {
            token_addresses,
            limit,
            orderby,
            direction,
        } => {
            let report = client
                .fetch_top_traders_batch(&token_addresses, limit, &orderby, direction)
                .await;
            emit(&report);
        }
    }

    ExitCode::SUCCESS
}

/// Writes one JSON document to stdout.
fn emit(report: &impl Serialize) {
    match serde_json::to_string(report) {
        Ok(body) => println!("{body}"),
        Err(err) => {
            error!("failed to serialize result: {err}");
            println!("{}", json!({"status": "error", "message": err.to_string()}));
        }
    }
}
