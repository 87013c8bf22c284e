//! # SunPower Poller Library
//!
//! Reads the current production of a SunPower site through the vendor's web
//! monitor API, keeping the session token on disk between runs so most polls
//! skip the login.
//!
//! Modules:
//! - `config`: account, settings and vendor contract
//! - `cache`: credential record, token store and the token cache manager
//! - `sources`: authentication exchange and production request
//! - `parser`: mapping vendor responses to records and readings
//! - `poller`: one poll cycle end to end

pub mod config;
pub mod cache;
pub mod error;
pub mod sources;
pub mod parser;
pub mod poller;
#[cfg(test)]
pub mod tests;
pub mod helpers;
pub mod utils;


pub use crate::config::sources::*;
pub use crate::error::PollerError;
