//! Session store
//!
//! Holds the current authentication token. The token is trusted until the
//! backend rejects it; nothing here checks expiry. Writers need `&mut`, guards
//! only ever see `&SessionStore`.

use serde::{Deserialize, Serialize};
use shopsmart_common::{AuthToken, Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// On-disk form of a session
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: AuthToken,
}

/// Process-wide session context
#[derive(Debug, Default)]
pub struct SessionStore {
    token: Option<AuthToken>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// A session that lives only as long as this value
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed session, loading any token saved by a previous run.
    ///
    /// An unreadable or corrupt file yields an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match load_token(&path) {
            Ok(token) => token,
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                None
            }
        };

        debug!(
            "Session opened from {} (authenticated: {})",
            path.display(),
            token.is_some()
        );

        Self {
            token,
            path: Some(path),
        }
    }

    /// Current token, if authenticated
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store a new token and persist it.
    ///
    /// The in-memory token is updated even if persisting fails.
    pub fn set_token(&mut self, token: AuthToken) -> Result<()> {
        self.token = Some(token);
        info!("Session token stored");

        match (&self.path, &self.token) {
            (Some(path), Some(token)) => save_token(path, token),
            _ => Ok(()),
        }
    }

    /// Drop the token and remove its persisted copy
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        info!("Session cleared");

        if let Some(path) = &self.path {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(Error::Session(format!(
                        "failed to remove {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Ok(())
    }
}

fn load_token(path: &Path) -> Result<Option<AuthToken>> {
    if !path.exists() {
        return Ok(None);
    }

    let data = std::fs::read_to_string(path)?;
    let persisted: PersistedSession = serde_json::from_str(&data)?;
    Ok(Some(persisted.token))
}

fn save_token(path: &Path, token: &AuthToken) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Session(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
    }

    let json = serde_json::to_string(&PersistedSession {
        token: token.clone(),
    })?;

    std::fs::write(path, json)
        .map_err(|e| Error::Session(format!("failed to write {}: {}", path.display(), e)))
}
