use tracing::{debug, info, warn};

use crate::cache::token::{CredentialRecord, Credentials};
use crate::cache::token_store::TokenStore;
use crate::error::PollerError;
use crate::helpers::time::now_i64;
use crate::sources::refresher::TokenRefresher;

/// Why the persisted record cannot be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// Record parsed but `now >= expiry`.
    Expired,
    /// Record absent, unreadable or malformed.
    Unavailable,
}

/// Outcome of evaluating the persisted record at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    Valid(String),
    NeedsRefresh(RefreshReason),
}

/// Where the returned token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    Cached,
    Refreshed,
}

/// Token handed to the caller of this run.
///
/// `persist_error` is set when a fresh token could not be written back; the
/// token is still valid for this run, only the next run will have to log in
/// again.
#[derive(Debug)]
pub struct ResolvedToken {
    pub token_id: String,
    pub origin: TokenOrigin,
    pub persist_error: Option<PollerError>,
}

/// Decide whether a loaded record can be served at `now`.
pub fn classify(loaded: Result<CredentialRecord, PollerError>, now: i64) -> CacheState {
    match loaded {
        Ok(record) if record.is_usable_at(now) => CacheState::Valid(record.token_id),
        Ok(_) => CacheState::NeedsRefresh(RefreshReason::Expired),
        Err(_) => CacheState::NeedsRefresh(RefreshReason::Unavailable),
    }
}

/// Serves a usable session token, refreshing and persisting it when the
/// stored one is expired or missing.
pub struct TokenCacheManager<S, R> {
    store: S,
    refresher: R,
    credentials: Credentials,
}

impl<S: TokenStore, R: TokenRefresher> TokenCacheManager<S, R> {
    pub fn new(store: S, refresher: R, credentials: Credentials) -> Self {
        Self { store, refresher, credentials }
    }

    /// Load the persisted record and classify it at `now`.
    pub async fn evaluate(&self, now: i64) -> CacheState {
        let loaded = self.store.load().await;
        if let Err(err) = &loaded {
            debug!("credential record not usable: {}", err);
        }
        classify(loaded, now)
    }

    pub async fn get_token(&self) -> Result<ResolvedToken, PollerError> {
        self.get_token_at(now_i64()).await
    }

    /// Same as `get_token` with an explicit clock reading.
    ///
    /// A refresh failure propagates and leaves the store untouched. A save
    /// failure after a successful refresh does not.
    pub async fn get_token_at(&self, now: i64) -> Result<ResolvedToken, PollerError> {
        let reason = match self.evaluate(now).await {
            CacheState::Valid(token_id) => {
                info!("using cached session token");
                return Ok(ResolvedToken { token_id, origin: TokenOrigin::Cached, persist_error: None });
            }
            CacheState::NeedsRefresh(reason) => reason,
        };

        info!(?reason, "refreshing session token");
        let record = self
            .refresher
            .refresh(&self.credentials.username, &self.credentials.password)
            .await?;

        let persist_error = self
            .store
            .save(&record)
            .await
            .inspect_err(|err| warn!("session token obtained but not persisted: {}", err))
            .err();

        Ok(ResolvedToken {
            token_id: record.token_id,
            origin: TokenOrigin::Refreshed,
            persist_error,
        })
    }
}
