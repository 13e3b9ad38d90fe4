use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Failed to read token file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse token file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to serialize token record")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to create token directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write token file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
