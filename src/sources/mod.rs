//! Sources module
//!
//! The two vendor calls of a poll cycle: the authentication exchange that
//! mints session tokens and the current-production request that spends them.

pub mod production;
pub mod refresher;

use std::time::Duration;

use reqwest::Client;

use crate::error::PollerError;

/// Shared HTTP client; `timeout_seconds` bounds every request end to end.
pub fn build_client(timeout_seconds: u64) -> Result<Client, PollerError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|err| PollerError::Config(format!("cannot build HTTP client: {}", err)))
}

pub(crate) fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("cannot connect: {}", err)
    } else {
        format!("request failed: {}", err)
    }
}
