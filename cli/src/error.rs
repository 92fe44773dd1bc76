use std::path::PathBuf;

use bacon_core::TraversalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("actor not found: {0}")]
    UnknownActor(String),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
