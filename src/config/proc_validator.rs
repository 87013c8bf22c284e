//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks:
//!   * required account fields
//!   * settings invariants (timeout, credential path, log level)
//!   * vendor contract (URLs, JSON pointers, header names/values)

use http::{HeaderName, HeaderValue};
use tracing::{error, info};

use crate::config::account::AccountConfig;
use crate::config::settings::SettingsConfig;
use crate::config::sources::{AuthSourceConfig, ProductionSourceConfig, ServiceConfig};
use crate::utils::constants::{ADDRESS_PLACEHOLDER, MAX_OFFSET_SECS};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_account(&cfg.account, &mut errors);
    validate_settings(&cfg.settings, &mut errors);
    validate_auth_source(&cfg.vendor.auth, &mut errors);
    validate_production_source(&cfg.vendor.production, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

/// ACCOUNT VALIDATION
fn validate_account(account: &AccountConfig, errors: &mut Vec<String>) {
    for (field, value) in [
        ("username", &account.username),
        ("password", &account.password),
        ("address", &account.address),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("account.{} is required and cannot be empty", field));
        }
    }

    if account.offset > MAX_OFFSET_SECS {
        errors.push(format!(
            "account.offset {} must be at most {} seconds",
            account.offset, MAX_OFFSET_SECS
        ));
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.http_timeout_seconds == 0 {
        errors.push("settings.http_timeout_seconds must be > 0".to_string());
    }

    if settings.credential_path.trim().is_empty() {
        errors.push("settings.credential_path cannot be empty".to_string());
    }

    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of: {}",
                logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
    }
}

/// VENDOR VALIDATION
fn validate_auth_source(auth: &AuthSourceConfig, errors: &mut Vec<String>) {
    validate_url("vendor.auth.url", &auth.url, errors);
    validate_pointer("vendor.auth.token_pointer", &auth.token_pointer, errors);
    validate_pointer("vendor.auth.expiry_pointer", &auth.expiry_pointer, errors);
}

fn validate_production_source(production: &ProductionSourceConfig, errors: &mut Vec<String>) {
    validate_url("vendor.production.url", &production.url, errors);
    if !production.url.contains(ADDRESS_PLACEHOLDER) {
        errors.push(format!(
            "vendor.production.url '{}' must contain the '{}' placeholder",
            production.url, ADDRESS_PLACEHOLDER
        ));
    }

    validate_pointer("vendor.production.value_pointer", &production.value_pointer, errors);

    if production.authorization_scheme.trim().is_empty() {
        errors.push("vendor.production.authorization_scheme cannot be empty".to_string());
    }

    for (name, value) in &production.headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(format!("vendor.production.headers: '{}' is not a valid header name", name));
        }
        if HeaderValue::from_str(value).is_err() {
            errors.push(format!(
                "vendor.production.headers.{}: '{}' is not a valid header value",
                name, value
            ));
        }
    }

    if let Some(success) = &production.success {
        validate_pointer("vendor.production.success.pointer", &success.pointer, errors);
    }
}

fn validate_url(path: &str, url: &str, errors: &mut Vec<String>) {
    if url.trim().is_empty() {
        errors.push(format!("{} cannot be empty", path));
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!("{} '{}' must be an http(s) URL", path, url));
    }
}

/// JSON pointers (RFC 6901) must start with '/'
fn validate_pointer(path: &str, pointer: &str, errors: &mut Vec<String>) {
    if !pointer.starts_with('/') {
        errors.push(format!("{} '{}' must be a JSON pointer starting with '/'", path, pointer));
    }
}
