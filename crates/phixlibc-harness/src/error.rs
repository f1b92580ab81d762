//! Harness error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported function '{0}'")]
    UnsupportedFunction(String),
    #[error("{function}: {message}")]
    InvalidInput { function: String, message: String },
    #[error("no fixture JSON files found in {}", .0.display())]
    NoFixtures(PathBuf),
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn input(function: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
