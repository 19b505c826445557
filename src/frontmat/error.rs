use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatError {
    #[error("Malformed property line: {line:?} (expected exactly one ':')")]
    MalformedProperty { line: String },

    #[error("Invalid lookup: {0} (expected a property key or a body line index)")]
    InvalidIndexType(String),

    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl FrontmatError {
    pub fn malformed(line: impl Into<String>) -> Self {
        FrontmatError::MalformedProperty { line: line.into() }
    }

    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FrontmatError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FrontmatError>;
