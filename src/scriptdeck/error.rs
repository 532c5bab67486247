use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Card position {position} is out of range (expected 1-70)")]
    OutOfRange { position: usize },

    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt card file {}: {reason}", path.display())]
    CorruptUnit { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl ScriptError {
    /// Wraps an io error with the path it happened on.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScriptError::Storage {
            path: path.into(),
            source,
        }
    }

    /// True for every failure that originates in the filesystem.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            ScriptError::Storage { .. } | ScriptError::CorruptUnit { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;
