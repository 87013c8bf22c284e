//! Shared constants and invariants

/// Subtracted from every server-reported expiry before the record is stored.
pub const SAFETY_MARGIN_SECONDS: i64 = 300;
/// Latest accepted server expiry: 9999-12-31T23:59:59Z.
pub const MAX_EXPIRY_EPOCH_SECS: i64 = 253_402_300_799;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OFFSET_SECS: u64 = 300;
/// One year.
pub const MAX_OFFSET_SECS: u64 = 31_536_000;
/// The data query window ends this far in the future.
pub const QUERY_LOOKAHEAD_SECS: i64 = 120;

pub const DEFAULT_CONFIG_PATH: &str = "sunpower.yaml";
pub const DEFAULT_CREDENTIAL_PATH: &str = "/tmp/sunpower.cred";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// SunPower web monitor contract
pub const SUNPOWER_AUTH_URL: &str = "https://elhapi.edp.sunpower.com/v1/elh/authenticate";
pub const SUNPOWER_PRODUCTION_URL: &str =
    "https://elhapi.edp.sunpower.com/v1/elh/address/{address}/currentpower";
pub const SUNPOWER_REFERER: &str = "https://monitor.us.sunpower.com/";
pub const SUNPOWER_AUTH_SCHEME: &str = "SP-CUSTOM";

/// Placeholder replaced with the account address in the production URL.
pub const ADDRESS_PLACEHOLDER: &str = "{address}";
