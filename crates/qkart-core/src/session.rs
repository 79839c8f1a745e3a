//! Explicit session context.
//!
//! A session is authenticated iff both a username and a token are present.
//! [`SessionStore`] persists the pair to a small JSON file so that separate
//! CLI invocations share a login.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SessionError;

#[derive(Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
        token: String,
    },
}

impl Session {
    #[must_use]
    pub fn authenticated(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Authenticated {
            username: username.into(),
            token: token.into(),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username, .. } => Some(username),
            Self::Anonymous => None,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            Self::Anonymous => None,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Authenticated { username, .. } => f
                .debug_struct("Authenticated")
                .field("username", username)
                .field("token", &"[redacted]")
                .finish(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    username: Option<String>,
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logged_in_at: Option<DateTime<Utc>>,
}

/// File-backed session persistence.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted session. A missing, unreadable or incomplete file
    /// yields [`Session::Anonymous`].
    #[must_use]
    pub fn load(&self) -> Session {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Session::Anonymous,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read session file");
                return Session::Anonymous;
            }
        };

        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(StoredSession {
                username: Some(username),
                token: Some(token),
                ..
            }) if !username.is_empty() && !token.is_empty() => {
                Session::authenticated(username, token)
            }
            Ok(_) => Session::Anonymous,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed session file");
                Session::Anonymous
            }
        }
    }

    /// Persists `session`. Saving [`Session::Anonymous`] is equivalent to
    /// [`SessionStore::clear`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file or its parent directory cannot
    /// be written, or [`SessionError::Serialize`] on encoding failure.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let Session::Authenticated { username, token } = session else {
            return self.clear();
        };

        let stored = StoredSession {
            username: Some(username.clone()),
            token: Some(token.clone()),
            logged_in_at: Some(Utc::now()),
        };
        let body = serde_json::to_string_pretty(&stored)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        std::fs::write(&self.path, body).map_err(|source| self.io_error(source))?;
        tracing::debug!(path = %self.path.display(), username = %username, "session saved");
        Ok(())
    }

    /// Removes the persisted session. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
