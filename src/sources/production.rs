use chrono::NaiveDateTime;
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use tracing::{debug, info};

use crate::config::sources::ProductionSourceConfig;
use crate::error::PollerError;
use crate::helpers::time::{local_now, query_ts};
use crate::parser::parser::parse_production;
use crate::sources::describe_transport_error;
use crate::utils::constants::{ADDRESS_PLACEHOLDER, QUERY_LOOKAHEAD_SECS};

/// Reads the current production of one site with a session token.
#[derive(Debug, Clone)]
pub struct ProductionFetcher {
    client: Client,
    contract: ProductionSourceConfig,
}

impl ProductionFetcher {
    pub fn new(client: Client, contract: ProductionSourceConfig) -> Self {
        Self { client, contract }
    }

    pub async fn fetch(&self, address: &str, offset_seconds: u64, token_id: &str) -> Result<f64, PollerError> {
        self.fetch_at(address, offset_seconds, token_id, local_now()).await
    }

    /// Same as `fetch` with the local wall clock read as `now`.
    pub async fn fetch_at(
        &self,
        address: &str,
        offset_seconds: u64,
        token_id: &str,
        now: NaiveDateTime,
    ) -> Result<f64, PollerError> {
        let (start, end) = query_window(now, offset_seconds)?;
        let url = self.build_url(address, &start, &end);
        info!(%url, "fetching current production");

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token_id)?)
            .send()
            .await
            .map_err(|err| PollerError::FetchFailure(describe_transport_error(&err)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| PollerError::FetchFailure(describe_transport_error(&err)))?;

        if !status.is_success() {
            return Err(PollerError::FetchFailure(format!(
                "HTTP {}: {}",
                status,
                PollerError::truncate_body(&body)
            )));
        }

        let production = parse_production(&body, &self.contract)?;
        debug!(production, "production parsed");
        Ok(production)
    }

    /// Query string is assembled by hand: the vendor wants the colons in the
    /// timestamps unescaped.
    pub fn build_url(&self, address: &str, start: &str, end: &str) -> String {
        let base = self.contract.url.replace(ADDRESS_PLACEHOLDER, address);
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{}{}starttime={}&endtime={}", base, separator, start, end)
    }

    pub fn build_headers(&self, token_id: &str) -> Result<HeaderMap, PollerError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.contract.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| PollerError::FetchFailure(format!("header name '{}': {}", name, err)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| PollerError::FetchFailure(format!("header '{}' value: {}", name, err)))?;
            headers.insert(name, value);
        }

        let mut authorization =
            HeaderValue::from_str(&format!("{} {}", self.contract.authorization_scheme, token_id))
                .map_err(|_| PollerError::FetchFailure("session token is not a valid header value".to_owned()))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        Ok(headers)
    }
}

/// Query window: `offset_seconds` back to two minutes ahead of `now`.
pub fn query_window(now: NaiveDateTime, offset_seconds: u64) -> Result<(String, String), PollerError> {
    let out_of_range =
        || PollerError::FetchFailure(format!("query offset of {}s is out of range", offset_seconds));
    let back = i64::try_from(offset_seconds).map_err(|_| out_of_range())?;
    let start = query_ts(now, -back).ok_or_else(out_of_range)?;
    let end = query_ts(now, QUERY_LOOKAHEAD_SECS).ok_or_else(out_of_range)?;
    Ok((start, end))
}
