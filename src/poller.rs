use tracing::info;

use crate::cache::token_cache::TokenCacheManager;
use crate::cache::token_store::FileTokenStore;
use crate::config::sources::ServiceConfig;
use crate::error::PollerError;
use crate::sources::build_client;
use crate::sources::production::ProductionFetcher;
use crate::sources::refresher::HttpTokenRefresher;

/// One poll cycle: resolve a session token, then read current production.
pub async fn run(config: &ServiceConfig) -> Result<f64, PollerError> {
    let client = build_client(config.settings.http_timeout_seconds)?;

    let manager = TokenCacheManager::new(
        FileTokenStore::new(&config.settings.credential_path),
        HttpTokenRefresher::new(client.clone(), config.vendor.auth.clone()),
        config.account.credentials(),
    );
    let token = manager.get_token().await?;
    info!(origin = ?token.origin, persisted = token.persist_error.is_none(), "session token ready");

    ProductionFetcher::new(client, config.vendor.production.clone())
        .fetch(&config.account.address, config.account.offset, &token.token_id)
        .await
}
