use crate::api::error::ApiError;
use crate::types::error::ReadingError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetatmoStationError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Reading(#[from] ReadingError),

    #[error("Client credentials are not configured")]
    MissingClientCredentials,

    #[error("No usable credentials in token file '{0}'")]
    MissingTokens(PathBuf),

    #[error("Failed to determine a token file location")]
    TokenPathResolution(#[source] std::io::Error),

    #[error("Failed to create token directory for '{0}'")]
    TokenDirCreation(PathBuf, #[source] std::io::Error),

    #[error("First update produced no station data")]
    InitialUpdate,
}
