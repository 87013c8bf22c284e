use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{MAX_EXPIRY_EPOCH_SECS, SAFETY_MARGIN_SECONDS};

/// Persisted session token.
///
/// `expiry` is already reduced by the safety margin, so the record stops
/// being served before the server's own deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub expiry: i64, // UNIX TIMESTAMP
    #[serde(rename = "tokenID")]
    pub token_id: String,
}

impl CredentialRecord {
    pub fn new(token_id: String, expiry: i64) -> Self {
        Self { token_id, expiry }
    }

    /// Build a record from the expiry the server reported.
    ///
    /// `None` when the expiry is outside `0..=MAX_EXPIRY_EPOCH_SECS`.
    pub fn from_server_expiry(token_id: String, server_expiry: i64) -> Option<Self> {
        if !(0..=MAX_EXPIRY_EPOCH_SECS).contains(&server_expiry) {
            return None;
        }
        let expiry = server_expiry.checked_sub(SAFETY_MARGIN_SECONDS)?;
        Some(Self::new(token_id, expiry))
    }

    pub fn is_usable_at(&self, now: i64) -> bool {
        now < self.expiry
    }
}

/// Account login used for the authentication exchange.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_expiry_is_reduced_by_margin() {
        let record = CredentialRecord::from_server_expiry("abc".into(), 10_000).unwrap();
        assert_eq!(record.expiry, 9_700);
        assert_eq!(record.token_id, "abc");
    }

    #[test]
    fn server_expiry_out_of_range_is_rejected() {
        assert!(CredentialRecord::from_server_expiry("abc".into(), i64::MIN).is_none());
        assert!(CredentialRecord::from_server_expiry("abc".into(), -1).is_none());
        assert!(CredentialRecord::from_server_expiry("abc".into(), i64::MAX).is_none());
        assert!(CredentialRecord::from_server_expiry("abc".into(), MAX_EXPIRY_EPOCH_SECS + 1).is_none());
        assert!(CredentialRecord::from_server_expiry("abc".into(), MAX_EXPIRY_EPOCH_SECS).is_some());
    }

    #[test]
    fn record_is_unusable_from_expiry_on() {
        let record = CredentialRecord::new("abc".into(), 1_000);
        assert!(record.is_usable_at(999));
        assert!(!record.is_usable_at(1_000));
        assert!(!record.is_usable_at(1_001));
    }

    #[test]
    fn on_disk_field_names() {
        let record = CredentialRecord::new("tok".into(), 42);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"expiry": 42, "tokenID": "tok"}));
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("me", "hunter2"));
        assert!(rendered.contains("me"));
        assert!(!rendered.contains("hunter2"));
    }
}
