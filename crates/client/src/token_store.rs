//! Storage for the bearer token between requests.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use crate::error::ClientError;

/// Where [`crate::ApiClient`] keeps the current session token.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Process-local token store; the session ends with the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) -> Result<(), ClientError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Persists the token in a single file so a session survives restarts.
///
/// A missing or blank file means "signed out".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read token file");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
