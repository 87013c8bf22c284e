use serde_json::Value;
use tracing::debug;

use crate::cache::token::CredentialRecord;
use crate::config::sources::{
    AuthSourceConfig, ExpirationSourceFormat, ProductionSourceConfig, SuccessCheck,
};
use crate::error::PollerError;

/// Map an authentication response body to a credential record.
///
/// The expiry is normalised to epoch seconds before the safety margin is
/// applied.
pub fn parse_credential(
    body: &str,
    contract: &AuthSourceConfig,
    now: i64,
) -> Result<CredentialRecord, PollerError> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        PollerError::AuthFailure(format!(
            "response is not JSON ({}): {}",
            e,
            PollerError::truncate_body(body)
        ))
    })?;

    let token_id = json
        .pointer(&contract.token_pointer)
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            PollerError::AuthFailure(format!(
                "token field '{}' missing or not a non-empty string",
                contract.token_pointer
            ))
        })?
        .to_owned();

    let raw_expiry = json
        .pointer(&contract.expiry_pointer)
        .and_then(as_i64)
        .ok_or_else(|| {
            PollerError::AuthFailure(format!(
                "expiry field '{}' missing or not an integer",
                contract.expiry_pointer
            ))
        })?;

    let out_of_range = || {
        PollerError::AuthFailure(format!(
            "expiry field '{}' out of range: {}",
            contract.expiry_pointer, raw_expiry
        ))
    };
    let server_expiry = match contract.expiry_format {
        ExpirationSourceFormat::Unix => Some(raw_expiry),
        ExpirationSourceFormat::UnixMillis => Some(raw_expiry / 1000),
        ExpirationSourceFormat::Seconds => now.checked_add(raw_expiry),
    }
    .ok_or_else(out_of_range)?;
    debug!(server_expiry, "session token parsed");

    CredentialRecord::from_server_expiry(token_id, server_expiry).ok_or_else(out_of_range)
}

/// Extract the current production value from a data response body.
pub fn parse_production(body: &str, contract: &ProductionSourceConfig) -> Result<f64, PollerError> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        PollerError::FetchFailure(format!(
            "response is not JSON ({}): {}",
            e,
            PollerError::truncate_body(body)
        ))
    })?;

    if let Some(check) = &contract.success {
        check_success(&json, check)?;
    }

    let field = json.pointer(&contract.value_pointer).ok_or_else(|| {
        PollerError::FetchFailure(format!(
            "production field '{}' missing: {}",
            contract.value_pointer,
            PollerError::truncate_body(body)
        ))
    })?;

    as_f64(field)
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            PollerError::FetchFailure(format!(
                "production field '{}' is not a number: {}",
                contract.value_pointer, field
            ))
        })
}

fn check_success(json: &Value, check: &SuccessCheck) -> Result<(), PollerError> {
    let actual = json.pointer(&check.pointer);
    if actual.is_some_and(|actual| same_scalar(actual, &check.expected)) {
        return Ok(());
    }
    Err(PollerError::FetchFailure(format!(
        "success field '{}' is {}, expected {}",
        check.pointer,
        actual.map(Value::to_string).unwrap_or_else(|| "missing".to_owned()),
        check.expected
    )))
}

/// `"200"` and `200` are the same status to the vendor.
fn same_scalar(actual: &Value, expected: &Value) -> bool {
    actual == expected || scalar_text(actual).is_some_and(|a| Some(a) == scalar_text(expected))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Whole floats like `1.7e9` only; fractions and values past `i64` are refused.
fn integral_f64(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
