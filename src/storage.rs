//! Token storage keyed by organizer identity.
//!
//! A stored entry couples the access token with the resource owner profile
//! it was issued to and an absolute expiration horizon: a fetch past the
//! horizon behaves as if no token were stored. Writes are keyed by the
//! owner's identity key, not the caller-supplied lookup key.
//!
//! No backend provides cross-process locking around the fetch/refresh/save
//! sequence; callers that need multi-process safety must serialize the
//! refresh path themselves.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::owner::ResourceOwner;
use crate::token::AccessToken;

/// Default retention horizon for stored tokens: 365 days.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(86_400 * 365);

/// A persisted token together with its owner profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// The access token.
    pub token: AccessToken,
    /// The resource owner the token was issued to.
    pub owner: ResourceOwner,
    /// When the entry was written.
    pub stored_at: DateTime<Utc>,
    /// When the entry stops being served (retention horizon, distinct
    /// from the access token's own expiry).
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    fn new(token: &AccessToken, owner: &ResourceOwner, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            token: token.clone(),
            owner: owner.clone(),
            stored_at: now,
            expires_at,
        }
    }

    fn is_stale(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Fetch/save of tokens keyed by organizer identity.
pub trait TokenStorage {
    /// Fetches the stored token for an organizer key.
    ///
    /// Returns `None` when nothing is stored or the entry is past its
    /// retention horizon.
    fn fetch_token(&self, organizer_key: &str) -> Result<Option<StoredToken>>;

    /// Stores a token and its owner profile, keyed by the owner's
    /// identity key, with the given retention horizon.
    fn save_token(&self, token: &AccessToken, owner: &ResourceOwner, ttl: Duration) -> Result<()>;
}

/// File-backed token storage, one JSON file per organizer key.
///
/// Writes go to a temp file first and are renamed into place, with
/// restrictive permissions on Unix.
#[derive(Debug)]
pub struct FileTokenStorage {
    dir: PathBuf,
}

impl FileTokenStorage {
    /// Creates a storage rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the default storage directory under the user's data dir.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gotowebinar")
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn token_path(&self, organizer_key: &str) -> PathBuf {
        self.dir.join(format!("token-{}.json", organizer_key))
    }
}

impl Default for FileTokenStorage {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl TokenStorage for FileTokenStorage {
    fn fetch_token(&self, organizer_key: &str) -> Result<Option<StoredToken>> {
        let path = self.token_path(organizer_key);
        if !path.exists() {
            debug!(organizer_key, "no token file at {:?}", path);
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| Error::storage(format!("failed to read token file: {}", e)))?;
        let entry: StoredToken = serde_json::from_str(&content)
            .map_err(|e| Error::storage(format!("failed to parse token file: {}", e)))?;

        if entry.is_stale() {
            debug!(organizer_key, "stored token past retention horizon");
            let _ = fs::remove_file(&path);
            return Ok(None);
        }

        debug!(organizer_key, "loaded token from {:?}", path);
        Ok(Some(entry))
    }

    fn save_token(&self, token: &AccessToken, owner: &ResourceOwner, ttl: Duration) -> Result<()> {
        let owner_key = owner
            .key()
            .ok_or_else(|| Error::storage("resource owner has no identity key"))?;
        let entry = StoredToken::new(token, owner, ttl);

        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::storage(format!("failed to create token directory: {}", e)))?;

        let path = self.token_path(&owner_key);
        let temp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&entry)
            .map_err(|e| Error::storage(format!("failed to serialize token: {}", e)))?;

        fs::write(&temp_path, &content)
            .map_err(|e| Error::storage(format!("failed to write token file: {}", e)))?;
        fs::rename(&temp_path, &path)
            .map_err(|e| Error::storage(format!("failed to rename token file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&path, perms);
        }

        info!(organizer_key = %owner_key, "saved token to {:?}", path);
        Ok(())
    }
}

/// In-process token storage for session-scoped use and tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: RwLock<HashMap<String, StoredToken>>,
}

impl MemoryTokenStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn fetch_token(&self, organizer_key: &str) -> Result<Option<StoredToken>> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .get(organizer_key)
            .filter(|entry| !entry.is_stale())
            .cloned())
    }

    fn save_token(&self, token: &AccessToken, owner: &ResourceOwner, ttl: Duration) -> Result<()> {
        let owner_key = owner
            .key()
            .ok_or_else(|| Error::storage("resource owner has no identity key"))?;
        let entry = StoredToken::new(token, owner, ttl);
        self.entries.write().unwrap().insert(owner_key, entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_token(access: &str) -> AccessToken {
        AccessToken {
            access_token: access.to_string(),
            refresh_token: Some("rt-1".to_string()),
            expires_at: Some(Utc::now() + chrono::Duration::hours(1)),
            claims: json!({"organizer_key": "111"}).as_object().unwrap().clone(),
        }
    }

    fn test_owner(key: &str) -> ResourceOwner {
        ResourceOwner::from_value(json!({"key": key, "email": "a@b.c"})).unwrap()
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());

        storage
            .save_token(&test_token("at-1"), &test_owner("111"), DEFAULT_TOKEN_TTL)
            .unwrap();

        let entry = storage.fetch_token("111").unwrap().unwrap();
        assert_eq!(entry.token.access_token, "at-1");
        assert_eq!(entry.owner.key().as_deref(), Some("111"));
        assert!(entry.expires_at > entry.stored_at);
    }

    #[test]
    fn default_dir_is_under_platform_data_dir() {
        let dir = FileTokenStorage::default_dir();
        assert!(dir.ends_with("gotowebinar"));
        if let Some(data_dir) = dirs::data_local_dir() {
            assert!(dir.starts_with(data_dir));
        }
    }

    #[test]
    fn file_storage_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());
        assert!(storage.fetch_token("nobody").unwrap().is_none());
    }

    #[test]
    fn file_storage_writes_under_owner_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());

        // Owner key differs from the token's organizer claim.
        storage
            .save_token(&test_token("at-1"), &test_owner("999"), DEFAULT_TOKEN_TTL)
            .unwrap();

        assert!(storage.fetch_token("999").unwrap().is_some());
        assert!(storage.fetch_token("111").unwrap().is_none());
    }

    #[test]
    fn file_storage_expired_horizon_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());

        storage
            .save_token(
                &test_token("at-1"),
                &test_owner("111"),
                Duration::from_secs(0),
            )
            .unwrap();

        assert!(storage.fetch_token("111").unwrap().is_none());
    }

    #[test]
    fn save_rejects_owner_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());
        let owner = ResourceOwner::from_value(json!({"email": "a@b.c"})).unwrap();
        assert!(
            storage
                .save_token(&test_token("at-1"), &owner, DEFAULT_TOKEN_TTL)
                .is_err()
        );
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryTokenStorage::new();
        storage
            .save_token(&test_token("at-1"), &test_owner("111"), DEFAULT_TOKEN_TTL)
            .unwrap();

        assert_eq!(storage.len(), 1);
        let entry = storage.fetch_token("111").unwrap().unwrap();
        assert_eq!(entry.token.access_token, "at-1");
        assert!(storage.fetch_token("222").unwrap().is_none());
    }

    #[test]
    fn memory_storage_honors_horizon() {
        let storage = MemoryTokenStorage::new();
        storage
            .save_token(
                &test_token("at-1"),
                &test_owner("111"),
                Duration::from_secs(0),
            )
            .unwrap();
        assert!(storage.fetch_token("111").unwrap().is_none());
    }
}
