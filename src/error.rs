use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrackError {
    #[error("IO Error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse Error: {0}")]
    Parse(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrackError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrackError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CrackResult<T> = Result<T, CrackError>;
