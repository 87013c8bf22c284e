// tests/common/mod.rs
pub use serde_json::json;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use httpmock::MockServer;

use crate::cache::token::CredentialRecord;
use crate::config::proc_loader::parse_config;
use crate::error::PollerError;
use crate::sources::refresher::TokenRefresher;
use crate::ServiceConfig;

pub const AUTH_PATH: &str = "/v1/elh/authenticate";
pub const ADDRESS: &str = "424242";
pub const PRODUCTION_PATH: &str = "/v1/elh/address/424242/currentpower";

/// Refresher double that counts calls and answers with a fixed outcome.
pub struct StubRefresher {
    calls: AtomicUsize,
    /// (token, server-reported expiry); None simulates a network error
    outcome: Option<(String, i64)>,
}

impl StubRefresher {
    pub fn returning(token: &str, server_expiry: i64) -> Self {
        Self { calls: AtomicUsize::new(0), outcome: Some((token.to_owned(), server_expiry)) }
    }

    pub fn failing() -> Self {
        Self { calls: AtomicUsize::new(0), outcome: None }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenRefresher for StubRefresher {
    async fn refresh(&self, _username: &str, _password: &str) -> Result<CredentialRecord, PollerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Some((token, server_expiry)) => {
                Ok(CredentialRecord::from_server_expiry(token.to_owned(), *server_expiry)
                    .expect("stub expiry in range"))
            }
            None => Err(PollerError::AuthFailure("simulated network error".to_owned())),
        }
    }
}

/// Config pointing both vendor endpoints at `server` and the credential
/// file at `credential_path`.
pub fn mock_service_config(server: &MockServer, credential_path: &Path, extra_production: &str) -> ServiceConfig {
    let yaml = format!(
        r#"
account:
  username: me
  password: secret
  address: {address}
  offset: 600
settings:
  credential_path: "{credential_path}"
  http_timeout_seconds: 5
vendor:
  auth:
    url: "{auth_url}"
  production:
    url: "{production_url}"
{extra_production}
"#,
        address = ADDRESS,
        credential_path = credential_path.display(),
        auth_url = server.url(AUTH_PATH),
        production_url = server.url("/v1/elh/address/{address}/currentpower"),
        extra_production = extra_production,
    );
    parse_config(yaml).expect("test config must be valid")
}
