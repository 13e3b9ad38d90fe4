//! Persistence and expiry evaluation for the OAuth2 credential record.
//!
//! The record lives as the sole contents of one JSON file. A missing or
//! unreadable file is not an error from the caller's point of view: it just
//! means no valid credentials exist yet, and the next successful refresh
//! writes a fresh file.

use crate::tokens::error::TokenStoreError;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// One OAuth2 credential record, as persisted to disk.
///
/// `expires_at` is serialized as an RFC 3339 timestamp. A record without it
/// still parses; it simply counts as expired and forces a refresh on the
/// next update tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// True if the record has no expiry timestamp or `now` is at or past it.
    /// No clock-skew margin is applied.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| now >= expires_at)
    }

    fn has_credentials(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}

/// Reads and writes the credential file at a fixed, explicit path.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored record, or `None` when no usable credentials exist.
    ///
    /// A missing file, malformed JSON, and empty credential fields all map
    /// to `None`; the cause is logged rather than surfaced.
    pub async fn load(&self) -> Option<TokenRecord> {
        let record = match self.try_load().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No token file at {}", self.path.display());
                return None;
            }
            Err(err) => {
                warn!("Ignoring stored tokens: {}", err);
                return None;
            }
        };
        if !record.has_credentials() {
            warn!(
                "Token file '{}' is missing credential fields",
                self.path.display()
            );
            return None;
        }
        Some(record)
    }

    /// Overwrites the credential file with `record`.
    ///
    /// Failures are logged and swallowed; the caller keeps using the record
    /// it already holds in memory and the next tick starts from scratch.
    pub async fn save(&self, record: &TokenRecord) {
        if let Err(err) = self.try_save(record).await {
            warn!("Failed to persist refreshed tokens: {}", err);
        }
    }

    /// Like [`TokenStore::load`], but with typed failures. `Ok(None)` means
    /// the file does not exist.
    pub async fn try_load(&self) -> Result<Option<TokenRecord>, TokenStoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TokenStoreError::Read(self.path.clone(), err)),
        };
        let record = serde_json::from_slice(&bytes)
            .map_err(|err| TokenStoreError::Parse(self.path.clone(), err))?;
        Ok(Some(record))
    }

    /// Like [`TokenStore::save`], but with typed failures. Creates the
    /// parent directory if it does not exist yet.
    pub async fn try_save(&self, record: &TokenRecord) -> Result<(), TokenStoreError> {
        let json = serde_json::to_vec(record).map_err(TokenStoreError::Serialize)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|err| TokenStoreError::DirCreation(parent.to_path_buf(), err))?;
            }
        }
        fs::write(&self.path, &json)
            .await
            .map_err(|err| TokenStoreError::Write(self.path.clone(), err))?;
        Ok(())
    }
}
