//! GMGN data client for Tron tokens.
//!
//! Provides typed models and async functions for pulling token trade
//! history and trader rankings from the GMGN analytics API, minting a
//! fresh randomized browser identity (TLS fingerprint + matching
//! user-agent and header set) for every outbound request.

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;

pub use error::{Result, TronwatchError};
