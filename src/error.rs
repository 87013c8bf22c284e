use thiserror::Error;

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Failure kinds of one poll cycle.
///
/// Only the token cache manager absorbs an error (`StoreUnavailable`);
/// everything else bubbles up to the binary and ends the run.
#[derive(Error, Debug)]
pub enum PollerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("authentication failed: {0}")]
    AuthFailure(String),

    #[error("production fetch failed: {0}")]
    FetchFailure(String),
}

impl PollerError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, PollerError::StoreUnavailable(_))
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, PollerError::AuthFailure(_))
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, PollerError::FetchFailure(_))
    }

    /// Truncate a response body to avoid logging excessive data
    pub fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
    }
}

#[cfg(test)]
mod tests {
    use super::PollerError;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(PollerError::truncate_body("nope"), "nope");
    }

    #[test]
    fn long_body_is_truncated_on_char_boundary() {
        let body = "é".repeat(400);
        let out = PollerError::truncate_body(&body);
        assert!(out.contains("truncated, 800 total bytes"));
        assert!(out.len() < body.len());
    }
}
