//! Token storage for persisting credentials.
//!
//! Exact Online invalidates a refresh token as soon as it has been used, so
//! every refresh must be written back before the old value is forgotten.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};
use crate::token::TokenSet;

/// Trait for token storage implementations.
pub trait TokenStorage: Send + Sync {
    /// Save a token set.
    fn save(&self, key: &str, tokens: &TokenSet) -> Result<()>;

    /// Load a token set.
    fn load(&self, key: &str) -> Result<Option<TokenSet>>;

    /// Delete a token set.
    fn delete(&self, key: &str) -> Result<()>;
}

/// File-based token storage, one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    base_path: PathBuf,
}

impl FileTokenStorage {
    /// Create a new file token storage with the default path.
    ///
    /// Default path: `~/.exact-online/tokens/`
    pub fn new() -> Result<Self> {
        let base_path = default_token_dir()?;
        Ok(Self { base_path })
    }

    /// Create a new file token storage with a custom path.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            base_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the token file path for a key.
    fn token_path(&self, key: &str) -> PathBuf {
        let safe_key = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect::<String>();

        self.base_path.join(format!("{safe_key}.json"))
    }
}

impl TokenStorage for FileTokenStorage {
    fn save(&self, key: &str, tokens: &TokenSet) -> Result<()> {
        std::fs::create_dir_all(&self.base_path)?;

        let path = self.token_path(key);
        let stored = StoredToken {
            tokens: tokens.clone(),
            stored_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<TokenSet>> {
        let path = self.token_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&path)?;
        let stored: StoredToken = serde_json::from_str(&json)?;

        Ok(Some(stored.tokens))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.token_path(key);

        if path.exists() {
            std::fs::remove_file(&path)?;
        }

        Ok(())
    }
}

/// In-process token storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    tokens: Mutex<HashMap<String, TokenSet>>,
}

impl MemoryTokenStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, TokenSet>>> {
        self.tokens
            .lock()
            .map_err(|_| Error::new(ErrorKind::Storage("token map lock poisoned".to_string())))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn save(&self, key: &str, tokens: &TokenSet) -> Result<()> {
        self.lock()?.insert(key.to_string(), tokens.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<TokenSet>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Token with storage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    tokens: TokenSet,
    stored_at: chrono::DateTime<chrono::Utc>,
}

/// Get the default token storage directory.
pub fn default_token_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::new(ErrorKind::Config("Could not find home directory".to_string())))?;

    Ok(home.join(".exact-online").join("tokens"))
}
