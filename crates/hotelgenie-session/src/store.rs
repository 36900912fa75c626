//! Persistent storage for the credential and role.
//!
//! The store is deliberately dumb: it saves what it's given, returns what
//! it has, and forgets on request. It never looks inside the credential.
//! Deciding whether a stored session is any good is the controller's job.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use hotelgenie_protocol::{Codec, Credential, JsonCodec, Role};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::SessionError;

/// A credential and its role, as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub credential: Credential,
    pub role: Role,
}

/// Key-value storage for the two session fields.
///
/// # Contract
///
/// - `save` overwrites both fields, without validating them.
/// - `load` returns `None` when either field is missing.
/// - `clear` removes both and is safe to call on an empty store.
///
/// Errors are reported, but the controller treats every one of them as
/// "no session", so an implementation never has to be clever about
/// recovery.
pub trait TokenStore: Send + Sync + 'static {
    /// Persists both fields, replacing whatever was there.
    fn save(
        &self,
        session: &StoredSession,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Returns the persisted session, or `None` if incomplete.
    fn load(&self) -> impl Future<Output = Result<Option<StoredSession>, SessionError>> + Send;

    /// Removes both fields.
    fn clear(&self) -> impl Future<Output = Result<(), SessionError>> + Send;
}

// ---------------------------------------------------------------------------
// MemoryTokenStore
// ---------------------------------------------------------------------------

/// A [`TokenStore`] that lives as long as the process.
///
/// Useful for embedding (a session that shouldn't survive a restart) and
/// for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemoryTokenStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `session`.
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    async fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.slot.lock().await = Some(session.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.slot.lock().await.take();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileTokenStore
// ---------------------------------------------------------------------------

/// The on-disk document: two optional string entries.
///
/// Both are `Option` so a half-written or hand-edited file still parses
/// and simply loads as "no session".
#[derive(Debug, Default, Serialize, Deserialize)]
struct Entries {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(rename = "authRole", default, skip_serializing_if = "Option::is_none")]
    auth_role: Option<String>,
}

/// A [`TokenStore`] backed by a small JSON file.
///
/// The file holds the same two entries a browser would keep in local
/// storage:
///
/// ```json
/// { "authToken": "eyJhbGciOi...", "authRole": "ROLE_CLIENT" }
/// ```
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash mid-write never leaves a truncated document behind. On Unix
/// the file is created readable by the owner only.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// A store persisting to `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the session document lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `bytes` to `temp`, then renames it over the document.
    async fn install(&self, temp: &Path, bytes: &[u8]) -> Result<(), SessionError> {
        tokio::fs::write(temp, bytes)
            .await
            .map_err(SessionError::Storage)?;
        restrict_permissions(temp).await?;
        tokio::fs::rename(temp, &self.path)
            .await
            .map_err(SessionError::Storage)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TokenStore for FileTokenStore {
    async fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        let entries = Entries {
            auth_token: Some(session.credential.as_str().to_string()),
            auth_role: Some(session.role.as_str().to_string()),
        };
        let bytes = JsonCodec.encode(&entries).map_err(SessionError::StoreFormat)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(SessionError::Storage)?;
        }

        let temp = self.temp_path();
        if let Err(e) = self.install(&temp, &bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(error = %cleanup, path = %temp.display(), "could not remove temp file");
                }
            }
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), "session persisted");
        Ok(())
    }

    async fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Storage(e)),
        };

        let entries: Entries = JsonCodec.decode(&bytes).map_err(SessionError::StoreFormat)?;

        let (Some(token), Some(label)) = (entries.auth_token, entries.auth_role) else {
            return Ok(None);
        };

        // An unreadable role is as good as a missing one.
        match label.parse::<Role>() {
            Ok(role) => Ok(Some(StoredSession {
                credential: Credential::new(token),
                role,
            })),
            Err(e) => {
                tracing::warn!(error = %e, "stored role is not recognised, ignoring session");
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e)),
        }
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), SessionError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .await
        .map_err(SessionError::Storage)
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), SessionError> {
    Ok(())
}
