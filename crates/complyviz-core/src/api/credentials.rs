//! Session token storage
//!
//! The API client asks a [`CredentialStore`] for the bearer token instead of
//! reading any global, so tests can inject an in-memory store and the CLI can
//! persist the session between invocations.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub trait CredentialStore: Send + Sync {
    fn get_token(&self) -> Result<Option<String>>;
    fn set_token(&self, token: &str, email: Option<&str>) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn get_token(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| Error::Other("credential lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn set_token(&self, token: &str, _email: Option<&str>) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::Other("credential lock poisoned".to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::Other("credential lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// JSON file under the data directory
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full stored record, if any
    pub fn load(&self) -> Result<Option<StoredCredentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

impl CredentialStore for FileCredentials {
    fn get_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.map(|stored| stored.token))
    }

    fn set_token(&self, token: &str, email: Option<&str>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredCredentials {
            token: token.to_string(),
            email: email.map(str::to_string),
            saved_at: Utc::now(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        tracing::debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
