//! Process-wide authentication session.
//!
//! One `SessionStore` is created at startup from the persisted session file
//! and shared by clone. All reads go through it and the only mutations are
//! the explicit [`SessionStore::login`] / [`SessionStore::logout`] calls,
//! which also persist or remove the file so the session survives restarts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::models::AuthResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<&AuthResponse> for Session {
    fn from(auth: &AuthResponse) -> Self {
        Session {
            token: auth.token.clone(),
            user_id: auth.id,
            name: auth.name.clone(),
            role: auth.role.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Initialize from the persisted session file. A missing or malformed
    /// file simply starts the client logged out.
    pub fn load(config: &SessionConfig) -> Self {
        let current = match fs::read_to_string(&config.file) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    debug!("restored session from {}", config.file.display());
                    Some(session)
                }
                Err(e) => {
                    warn!("ignoring malformed session file {}: {}", config.file.display(), e);
                    None
                }
            },
            Err(_) => None,
        };

        SessionStore {
            path: Some(config.file.clone()),
            current: Arc::new(RwLock::new(current)),
        }
    }

    /// A store that never touches the filesystem. Used in tests.
    pub fn in_memory() -> Self {
        SessionStore { path: None, current: Arc::new(RwLock::new(None)) }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().expect("session lock poisoned").clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn login(&self, session: Session) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, serde_json::to_string_pretty(&session)?)?;
        }
        *self.current.write().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        *self.current.write().expect("session lock poisoned") = None;
        Ok(())
    }
}
