use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::cache::token::CredentialRecord;
use crate::error::PollerError;

/// Durable slot holding the last credential record.
///
/// Absent, unreadable and malformed records all surface as
/// `PollerError::StoreUnavailable`.
pub trait TokenStore {
    fn load(&self) -> impl Future<Output = Result<CredentialRecord, PollerError>> + Send;

    fn save(
        &self,
        record: &CredentialRecord,
    ) -> impl Future<Output = Result<(), PollerError>> + Send;
}

fn decode(raw: &str) -> Result<CredentialRecord, PollerError> {
    serde_json::from_str(raw)
        .map_err(|err| PollerError::StoreUnavailable(format!("malformed credential record: {}", err)))
}

fn encode(record: &CredentialRecord) -> Result<String, PollerError> {
    serde_json::to_string(record)
        .map_err(|err| PollerError::StoreUnavailable(format!("cannot encode credential record: {}", err)))
}

/// ================================
/// File store
/// ================================

/// Credential record kept as a JSON file.
///
/// Writes go through a sibling `.tmp` file renamed over the target, so a
/// reader sees either the previous record or the new one. There is no
/// locking: overlapping runs both write and the last one wins.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn unavailable(&self, action: &str, err: std::io::Error) -> PollerError {
        PollerError::StoreUnavailable(format!("{} '{}': {}", action, self.path.display(), err))
    }
}

impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<CredentialRecord, PollerError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => {
                PollerError::StoreUnavailable(format!("no credential file at '{}'", self.path.display()))
            }
            _ => self.unavailable("cannot read", err),
        })?;
        decode(&raw)
    }

    async fn save(&self, record: &CredentialRecord) -> Result<(), PollerError> {
        let content = encode(record)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.unavailable("cannot create parent of", err))?;
        }

        let tmp = self.tmp_path();
        match tokio::fs::remove_file(&tmp).await {
            Err(err) if err.kind() != ErrorKind::NotFound => {
                return Err(self.unavailable("cannot clear stale temp file for", err));
            }
            _ => {}
        }

        // create_new refuses to follow a link left at the temp name
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options
            .open(&tmp)
            .await
            .map_err(|err| self.unavailable("cannot create temp file for", err))?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|err| self.unavailable("cannot write temp file for", err))?;
        file.sync_all()
            .await
            .map_err(|err| self.unavailable("cannot flush temp file for", err))?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| self.unavailable("cannot replace", err))?;
        debug!(path = %self.path.display(), expiry = record.expiry, "credential record saved");
        Ok(())
    }
}

/// ================================
/// In-memory store
/// ================================

/// Holds the serialized record in memory, keeping the raw text so a
/// corrupt slot can be represented.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    raw: Mutex<Option<String>>,
    saves: AtomicUsize,
    reject_writes: AtomicBool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: &CredentialRecord) -> Self {
        let store = Self::new();
        if let Ok(raw) = encode(record) {
            store.set_raw(raw);
        }
        store
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_raw(raw.into());
        store
    }

    /// Make every subsequent `save` fail, as a full or read-only disk would.
    pub fn reject_writes(self) -> Self {
        self.reject_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn raw(&self) -> Option<String> {
        self.slot().clone()
    }

    pub fn record(&self) -> Option<CredentialRecord> {
        self.raw().and_then(|raw| decode(&raw).ok())
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn set_raw(&self, raw: String) {
        *self.slot() = Some(raw);
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.raw.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<CredentialRecord, PollerError> {
        let raw = self
            .raw()
            .ok_or_else(|| PollerError::StoreUnavailable("no credential record in memory".to_owned()))?;
        decode(&raw)
    }

    async fn save(&self, record: &CredentialRecord) -> Result<(), PollerError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(PollerError::StoreUnavailable("store is read-only".to_owned()));
        }
        self.set_raw(encode(record)?);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl<S: TokenStore + Sync> TokenStore for &S {
    fn load(&self) -> impl Future<Output = Result<CredentialRecord, PollerError>> + Send {
        (**self).load()
    }

    fn save(
        &self,
        record: &CredentialRecord,
    ) -> impl Future<Output = Result<(), PollerError>> + Send {
        (**self).save(record)
    }
}
