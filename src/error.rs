//! Error types for the generator and the credential store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("password length {length} is too short for {required} required character classes")]
    InvalidLength { length: usize, required: usize },

    #[error("character set '{0}' is empty")]
    EmptyCharacterSet(&'static str),

    #[error("wrong master password")]
    WrongMasterSecret,

    #[error("service already exists: {0}")]
    ServiceAlreadyExists(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Failures reading or writing the backing store file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed store file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistenceError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
