use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use tracing::{debug, warn};

use super::token::Token;
use crate::error::{GateError, Result};

/// Namespace prefix of the storage key; the full key is
/// `<namespace>-<client_id>`.
pub const AUTH_SESSION_STORAGE_KEY: &str = "tokengate";

/// Session-scoped string storage supplied by the host.
///
/// Mirrors the browser's `sessionStorage`: values must survive a reload of
/// the host but need not outlive the session.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-process storage; lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| GateError::Storage("memory storage lock poisoned".to_string()))
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items()?.remove(key);
        Ok(())
    }
}

/// File-backed storage for native hosts: one JSON object per file, written
/// atomically with owner-only permissions.
///
/// # Example
/// ```no_run
/// use tokengate::auth::{FileStorage, SessionStorage};
///
/// let storage = FileStorage::new_default();
/// storage.set_item("tokengate-12345", "{}")?;
/// # Ok::<(), tokengate::error::GateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.tokengate/session.json`.
    pub fn new_default() -> Self {
        Self::new(default_tokengate_dir().join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(GateError::Io(err)),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(items)?;
        atomic_write(&self.path, &serialized)
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Storage key for a client's token record.
pub fn storage_key(client_id: &str) -> String {
    format!("{AUTH_SESSION_STORAGE_KEY}-{client_id}")
}

/// Persist `token` for `client_id`, stamping `expires_at` if it is unset.
///
/// A token that already carries `expires_at` keeps it, so re-saving a
/// record never moves its expiry.
pub fn save_token(token: Token, storage: &dyn SessionStorage, client_id: &str) -> Result<Token> {
    let mut token = token;
    if token.expires_at.is_none() {
        token.expires_at = Some(
            Utc::now()
                .timestamp_millis()
                .saturating_add(token.lifetime_millis()),
        );
    }
    let serialized = serde_json::to_string(&token)?;
    storage.set_item(&storage_key(client_id), &serialized)?;
    debug!(client_id, expires_at = ?token.expires_at, "saved token");
    Ok(token)
}

/// The token record of one client in session storage.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn SessionStorage>,
    client_id: String,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("client_id", &self.client_id)
            .field("storage", &"..")
            .finish()
    }
}

impl TokenStore {
    pub fn new(storage: Arc<dyn SessionStorage>, client_id: impl Into<String>) -> Self {
        Self {
            storage,
            client_id: client_id.into(),
        }
    }

    pub fn key(&self) -> String {
        storage_key(&self.client_id)
    }

    pub fn save(&self, token: Token) -> Result<Token> {
        save_token(token, self.storage.as_ref(), &self.client_id)
    }

    /// The stored record, valid or not. Missing or unreadable entries are
    /// reported as no token.
    pub fn load(&self) -> Option<Token> {
        let key = self.key();
        let raw = match self.storage.get_item(&key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key = %key, error = %err, "token storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(token) => Some(token),
            Err(err) => {
                warn!(key = %key, error = %err, "ignoring corrupt token record");
                None
            }
        }
    }

    /// The stored record if it has not expired yet.
    pub fn valid_token(&self) -> Option<Token> {
        self.load().filter(Token::is_valid)
    }
}

fn default_tokengate_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".tokengate"))
        .unwrap_or_else(|| PathBuf::from(".tokengate"))
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path.file_name().ok_or_else(|| {
        GateError::Storage(format!("storage path {} has no file name", path.display()))
    })?;

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_name = format!(
        ".{}.tmp-{}-{nonce}",
        file_name.to_string_lossy(),
        std::process::id()
    );
    let temp_path = path.with_file_name(temp_name);

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = options.open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(GateError::Io(err));
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(GateError::Io(err));
    }

    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    Ok(())
}
