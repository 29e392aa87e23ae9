use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::client::UserProfile;

/// What a logged-in client remembers between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Could not access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Session persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the stored session, or `None` when nobody is logged in.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let contents =
            serde_json::to_string_pretty(session).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, contents).map_err(|source| self.io_error(source))
    }

    /// Forgets the session. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn session() -> Session {
        Session {
            token: "mock-jwt-token".to_string(),
            user: UserProfile {
                id: "1".to_string(),
                email: "test@example.com".to_string(),
                name: "Test User".to_string(),
            },
        }
    }

    #[test]
    fn can_load_nothing_when_file_missing() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = SessionFile::new(dir.child("session.json").path());

        assert_eq!(file.load().unwrap(), None);
    }

    #[test]
    fn can_save_and_load_session() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = SessionFile::new(dir.child("session.json").path());

        file.save(&session()).unwrap();

        assert_eq!(file.load().unwrap(), Some(session()));
        dir.child("session.json")
            .assert(predicates::str::contains("\"token\": \"mock-jwt-token\""));
    }

    #[test]
    fn can_clear_twice() {
        let dir = assert_fs::TempDir::new().unwrap();
        let child = dir.child("session.json");
        let file = SessionFile::new(child.path());
        file.save(&session()).unwrap();

        file.clear().unwrap();
        file.clear().unwrap();

        child.assert(predicates::path::missing());
    }

    #[test]
    fn can_report_corrupt_session() {
        let dir = assert_fs::TempDir::new().unwrap();
        let child = dir.child("session.json");
        child.write_str("not json").unwrap();

        let err = SessionFile::new(child.path()).load().unwrap_err();

        assert!(matches!(err, SessionError::Corrupt { .. }));
    }
}
