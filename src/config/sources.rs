use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::{account::AccountConfig, settings::SettingsConfig};
use crate::utils::constants::{
    SUNPOWER_AUTH_SCHEME, SUNPOWER_AUTH_URL, SUNPOWER_PRODUCTION_URL, SUNPOWER_REFERER,
};


/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub vendor: VendorConfig,
}

/// ================================
/// Vendor contract
/// ================================

/// Endpoints and field locations of the undocumented vendor API.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct VendorConfig {
    #[serde(default)]
    pub auth: AuthSourceConfig,
    #[serde(default)]
    pub production: ProductionSourceConfig,
}

/// Authentication exchange: POST {username, password} -> token + expiry
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSourceConfig {
    #[serde(default = "default_auth_url")]
    pub url: String,
    /// JSON pointer to the session token
    #[serde(default = "default_token_pointer")]
    pub token_pointer: String,
    /// JSON pointer to the expiry
    #[serde(default = "default_expiry_pointer")]
    pub expiry_pointer: String,
    #[serde(default)]
    pub expiry_format: ExpirationSourceFormat,
}

impl Default for AuthSourceConfig {
    fn default() -> Self {
        Self {
            url: default_auth_url(),
            token_pointer: default_token_pointer(),
            expiry_pointer: default_expiry_pointer(),
            expiry_format: ExpirationSourceFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationSourceFormat {
    /// Unix timestamp (integer seconds since epoch)
    #[default]
    Unix,

    /// Unix timestamp in milliseconds
    UnixMillis,

    /// Duration in seconds until expiration.
    Seconds,
}

/// Current production request: GET with starttime/endtime query
#[derive(Debug, Deserialize, Clone)]
pub struct ProductionSourceConfig {
    /// URL template, `{address}` is replaced with the account address
    #[serde(default = "default_production_url")]
    pub url: String,
    /// JSON pointer to the numeric production value
    #[serde(default = "default_value_pointer")]
    pub value_pointer: String,
    /// Prefix of the Authorization header value
    #[serde(default = "default_authorization_scheme")]
    pub authorization_scheme: String,
    /// Extra headers the vendor's web monitor sends
    #[serde(default = "default_production_headers")]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub success: Option<SuccessCheck>,
}

impl Default for ProductionSourceConfig {
    fn default() -> Self {
        Self {
            url: default_production_url(),
            value_pointer: default_value_pointer(),
            authorization_scheme: default_authorization_scheme(),
            headers: default_production_headers(),
            success: None,
        }
    }
}

/// Body field that must hold `expected` for the reading to be trusted.
#[derive(Debug, Deserialize, Clone)]
pub struct SuccessCheck {
    pub pointer: String,
    pub expected: Value,
}

fn default_auth_url() -> String {
    SUNPOWER_AUTH_URL.to_owned()
}

fn default_token_pointer() -> String {
    "/tokenID".to_owned()
}

fn default_expiry_pointer() -> String {
    "/expiresEpm".to_owned()
}

fn default_production_url() -> String {
    SUNPOWER_PRODUCTION_URL.to_owned()
}

fn default_value_pointer() -> String {
    "/data/production".to_owned()
}

fn default_authorization_scheme() -> String {
    SUNPOWER_AUTH_SCHEME.to_owned()
}

fn default_production_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Accept".to_owned(), "application/json, text/plain".to_owned()),
        ("Accept-Language".to_owned(), "en-US".to_owned()),
        ("Referer".to_owned(), SUNPOWER_REFERER.to_owned()),
    ])
}
