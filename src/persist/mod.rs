//! Session persistence. The vault keeps exactly one serialized record;
//! storing and clearing operate on the whole record, never on individual
//! fields, so a partially written session cannot survive a restart.

use crate::session::Session;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("vault lock poisoned")]
    Poisoned,
}

/// Persistence contract for the session record.
///
/// The vault is a mirror of the in-memory session, not a second owner:
/// callers keep going when a vault operation fails.
pub trait SessionVault: Send {
    /// # Errors
    /// Returns an error when the backing store cannot be read or the record
    /// does not parse.
    fn load(&self) -> Result<Option<Session>, VaultError>;

    /// # Errors
    /// Returns an error when the record cannot be written.
    fn store(&self, session: &Session) -> Result<(), VaultError>;

    /// # Errors
    /// Returns an error when the record cannot be removed. Clearing an
    /// already empty vault is not an error.
    fn clear(&self) -> Result<(), VaultError>;
}

/// JSON file vault; the record survives across processes.
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionVault for FileVault {
    fn load(&self) -> Result<Option<Session>, VaultError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn store(&self, session: &Session) -> Result<(), VaultError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write the whole record aside, then swap it into place.
        let staged = self.path.with_extension("tmp");
        fs::write(&staged, serde_json::to_string_pretty(session)?)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), VaultError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory vault for tests and ephemeral sessions. Clones share the
/// underlying record, so a test can keep a handle for assertions while the
/// store owns another.
#[derive(Clone, Default)]
pub struct MemoryVault {
    record: Arc<Mutex<Option<Session>>>,
}

impl MemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current record, for assertions.
    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        self.record.lock().map_or(None, |guard| guard.clone())
    }
}

impl SessionVault for MemoryVault {
    fn load(&self) -> Result<Option<Session>, VaultError> {
        let guard = self.record.lock().map_err(|_| VaultError::Poisoned)?;
        Ok(guard.clone())
    }

    fn store(&self, session: &Session) -> Result<(), VaultError> {
        let mut guard = self.record.lock().map_err(|_| VaultError::Poisoned)?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), VaultError> {
        let mut guard = self.record.lock().map_err(|_| VaultError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
