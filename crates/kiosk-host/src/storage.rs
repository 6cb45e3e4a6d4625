//! Persistence of the session token

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kiosk_core::prelude::*;

/// File name of the persisted token inside the data directory
pub const TOKEN_FILE_NAME: &str = "kiosk_token";

/// Where the session token survives restarts
#[cfg_attr(any(test, feature = "test-helpers"), mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Previously saved token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Replace the saved token
    fn save(&self, token: &str) -> Result<()>;
}

/// Token kept in a single file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `{data_local_dir}/kiosk-play/kiosk_token`
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kiosk-play")
            .join(TOKEN_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let token = text.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(&self.path, e.to_string())),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::storage(parent, e.to_string()))?;
        }
        std::fs::write(&self.path, token).map_err(|e| Error::storage(&self.path, e.to_string()))?;
        debug!("Session token saved to {}", self.path.display());
        Ok(())
    }
}

/// Token kept in memory only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .map_err(|_| Error::storage("<memory>", "lock poisoned"))?
            .clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| Error::storage("<memory>", "lock poisoned"))? = Some(token.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join(TOKEN_FILE_NAME));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join(TOKEN_FILE_NAME));
        store.save("abc.def").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def"));

        store.save("second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_blank_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(FileTokenStore::new(path).load().unwrap(), None);
    }

    #[test]
    fn test_file_store_unreadable_path_is_storage_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let store = FileTokenStore::new(dir.path());
        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("t1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("t1"));
        assert_eq!(
            MemoryTokenStore::with_token("x").load().unwrap().as_deref(),
            Some("x")
        );
    }
}
