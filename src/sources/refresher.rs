use std::future::Future;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::token::CredentialRecord;
use crate::config::sources::AuthSourceConfig;
use crate::error::PollerError;
use crate::helpers::time::now_i64;
use crate::parser::parser::parse_credential;
use crate::sources::describe_transport_error;

/// Trades account credentials for a fresh session token.
///
/// One attempt per call, nothing is persisted.
pub trait TokenRefresher {
    fn refresh(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<CredentialRecord, PollerError>> + Send;
}

#[derive(Serialize)]
struct AuthenticateRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Authentication exchange against the vendor's login endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenRefresher {
    client: Client,
    contract: AuthSourceConfig,
}

impl HttpTokenRefresher {
    pub fn new(client: Client, contract: AuthSourceConfig) -> Self {
        Self { client, contract }
    }
}

impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, username: &str, password: &str) -> Result<CredentialRecord, PollerError> {
        info!(url = %self.contract.url, "authenticating");

        let response = self
            .client
            .post(&self.contract.url)
            .json(&AuthenticateRequest { username, password })
            .send()
            .await
            .map_err(|err| PollerError::AuthFailure(describe_transport_error(&err)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| PollerError::AuthFailure(describe_transport_error(&err)))?;

        if !status.is_success() {
            return Err(PollerError::AuthFailure(format!(
                "HTTP {}: {}",
                status,
                PollerError::truncate_body(&body)
            )));
        }

        let record = parse_credential(&body, &self.contract, now_i64())?;
        debug!(expiry = record.expiry, "session token refreshed");
        Ok(record)
    }
}

impl<R: TokenRefresher + Sync> TokenRefresher for &R {
    fn refresh(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<CredentialRecord, PollerError>> + Send {
        (**self).refresh(username, password)
    }
}
