//! Session-token persistence.
//!
//! Exactly one opaque token is stored at a time, under a fixed key.
//! Storing a new token replaces any prior one. The trait methods are
//! deliberately infallible: storage failures are logged and absorbed,
//! because callers treat an absent token as "not authenticated" rather
//! than as an error.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use keyring::Entry;
use tracing::{debug, warn};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Keyring service name and data-directory name
const SERVICE_NAME: &str = "ventanilla";

/// Fixed storage key: the keyring account name and the fallback file name
const TOKEN_KEY: &str = "jwt_token";

/// Persistence for the single session token.
pub trait TokenStore: Send + Sync {
    /// Store the token, replacing any prior value. Failures are
    /// swallowed after logging.
    fn save(&self, token: &str);

    /// The stored token, or `None` if never set or if the backing
    /// storage is unavailable.
    fn get(&self) -> Option<String>;

    /// Remove the token. Idempotent; clearing an absent token is fine.
    fn clear(&self);
}

// ============================================================================
// OS keychain store
// ============================================================================

/// Token storage in the OS keychain.
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry() -> keyring::Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_KEY)
    }

    fn store_token(&self, token: &str) -> keyring::Result<()> {
        Self::entry()?.set_password(token)
    }

    fn read_token(&self) -> keyring::Result<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn delete_token(&self) -> keyring::Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl TokenStore for KeyringStore {
    fn save(&self, token: &str) {
        if let Err(e) = self.store_token(token) {
            warn!(error = %e, "Failed to store session token in OS keychain");
        }
    }

    fn get(&self) -> Option<String> {
        match self.read_token() {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "Failed to read session token from OS keychain");
                None
            }
        }
    }

    fn clear(&self) {
        if let Err(e) = self.delete_token() {
            warn!(error = %e, "Failed to clear session token from OS keychain");
        }
    }
}

// ============================================================================
// File store
// ============================================================================

/// Token storage as a plain file holding the raw token string.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_token(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;

        // Restrict to the owner (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }

    fn read_token(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn delete_token(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl TokenStore for FileStore {
    fn save(&self, token: &str) {
        if let Err(e) = self.write_token(token) {
            warn!(error = %e, path = %self.path.display(), "Failed to write token file");
        }
    }

    fn get(&self) -> Option<String> {
        match self.read_token() {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, path = %self.path.display(), "Failed to read token file");
                None
            }
        }
    }

    fn clear(&self) {
        if let Err(e) = self.delete_token() {
            warn!(error = %e, path = %self.path.display(), "Failed to remove token file");
        }
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Ephemeral token storage. Useful in tests and for runs that should
/// leave nothing behind.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        *self.cell() = Some(token.to_string());
    }

    fn get(&self) -> Option<String> {
        self.cell().clone()
    }

    fn clear(&self) {
        *self.cell() = None;
    }
}

// ============================================================================
// Platform composite
// ============================================================================

/// Production store: OS keychain first, file fallback second.
///
/// `get` consults the file when the keychain errors or holds nothing,
/// so a token written during a keychain outage is still found later.
pub struct PlatformTokenStore {
    keyring: KeyringStore,
    file: Option<FileStore>,
}

impl PlatformTokenStore {
    pub fn new() -> Self {
        let file = default_token_path().map(FileStore::new);
        if file.is_none() {
            warn!("No user data directory; the token-file fallback is disabled");
        }
        Self {
            keyring: KeyringStore::new(),
            file,
        }
    }
}

fn default_token_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(SERVICE_NAME).join(TOKEN_KEY))
}

impl TokenStore for PlatformTokenStore {
    fn save(&self, token: &str) {
        match self.keyring.store_token(token) {
            Ok(()) => {
                debug!("Session token stored in OS keychain");
                // Drop any stale copy left by an earlier keychain outage
                if let Some(ref file) = self.file {
                    if let Err(e) = file.delete_token() {
                        debug!(error = %e, "Could not remove fallback token file");
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "OS keychain unavailable, falling back to token file");
                match self.file {
                    Some(ref file) => {
                        if let Err(e) = file.write_token(token) {
                            warn!(
                                error = %e,
                                "Failed to persist session token; it will not survive this process"
                            );
                        }
                    }
                    None => warn!("No fallback available; session token not persisted"),
                }
            }
        }
    }

    fn get(&self) -> Option<String> {
        match self.keyring.read_token() {
            Ok(Some(token)) => return Some(token),
            Ok(None) => {}
            Err(e) => debug!(error = %e, "OS keychain unavailable, trying token file"),
        }
        let file = self.file.as_ref()?;
        match file.read_token() {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "Failed to read fallback token file");
                None
            }
        }
    }

    fn clear(&self) {
        if let Err(e) = self.keyring.delete_token() {
            warn!(error = %e, "Failed to clear session token from OS keychain");
        }
        if let Some(ref file) = self.file {
            if let Err(e) = file.delete_token() {
                warn!(error = %e, "Failed to remove fallback token file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.save("abc.def.ghi");
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_memory_store_replaces_silently() {
        let store = MemoryTokenStore::new();
        store.save("first");
        store.save("second");
        assert_eq!(store.get().as_deref(), Some("second"));
    }

    #[test]
    fn test_memory_store_clear_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.clear();
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("jwt_token"));

        assert_eq!(store.get(), None);

        store.save("abc.def.ghi");
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));

        store.save("replacement");
        assert_eq!(store.get().as_deref(), Some("replacement"));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("deeper").join("jwt_token"));
        store.save("tok");
        assert_eq!(store.get().as_deref(), Some("tok"));
    }

    #[test]
    fn test_file_store_clear_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("jwt_token"));
        // No file on disk yet; must not log an error-level failure or panic
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_owner_only_permissions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jwt_token");
        let store = FileStore::new(&path);
        store.save("tok");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
