//! The main entry point for polling a Netatmo weather station.
//!
//! A [`NetatmoStation`] owns the credential store and the API client; the
//! host's scheduler drives it by calling [`NetatmoStation::tick`] on a fixed
//! interval and displaying whatever comes back.

use crate::api::client::{ApiClient, DEFAULT_BASE_URL};
use crate::error::NetatmoStationError;
use crate::tokens::store::TokenStore;
use crate::types::dashboard::DashboardReading;
use crate::utils::{default_token_path, ensure_parent_dir_exists};
use bon::bon;
use chrono::Utc;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// How often the host is expected to trigger an update tick.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// A configured station poller.
///
/// Construction goes through a builder; only the OAuth2 client credentials
/// are required. The credential file must already contain a refresh token
/// obtained out of band (the provider's developer console) — this crate only
/// keeps it fresh from there.
///
/// # Examples
///
/// ```no_run
/// # use netatmo_station::{NetatmoStation, NetatmoStationError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), NetatmoStationError> {
/// let station = NetatmoStation::builder()
///     .client_id("my-client-id".to_string())
///     .client_secret("my-client-secret".to_string())
///     .build()
///     .await?;
///
/// if let Some(reading) = station.tick().await {
///     println!("indoor temperature: {} °C", reading.temperature);
/// }
/// # Ok(())
/// # }
/// ```
pub struct NetatmoStation {
    api: ApiClient,
    store: TokenStore,
    update_interval: Duration,
}

#[bon]
impl NetatmoStation {
    /// Creates a new `NetatmoStation`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.client_id(String)`: **Required.** OAuth2 client id.
    /// * `.client_secret(String)`: **Required.** OAuth2 client secret.
    /// * `.token_path(PathBuf)`: Optional. Where the credential file lives.
    ///   Defaults to `netatmo_station/netatmo_tokens.json` under the user's
    ///   config directory.
    /// * `.base_url(String)`: Optional. API host, without a trailing slash.
    ///   Defaults to `https://api.netatmo.com`.
    /// * `.update_interval(Duration)`: Optional. The polling interval the
    ///   host scheduler should use, surfaced via
    ///   [`NetatmoStation::update_interval`]. Defaults to 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns [`NetatmoStationError::MissingClientCredentials`] if either
    /// credential is empty, [`NetatmoStationError::TokenPathResolution`] if
    /// no default token path can be determined, and
    /// [`NetatmoStationError::TokenDirCreation`] if the token file's parent
    /// directory cannot be created.
    #[builder]
    pub async fn new(
        client_id: String,
        client_secret: String,
        token_path: Option<PathBuf>,
        base_url: Option<String>,
        update_interval: Option<Duration>,
    ) -> Result<Self, NetatmoStationError> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(NetatmoStationError::MissingClientCredentials);
        }
        let token_path = match token_path {
            Some(path) => path,
            None => default_token_path().map_err(NetatmoStationError::TokenPathResolution)?,
        };
        ensure_parent_dir_exists(&token_path)
            .await
            .map_err(|e| NetatmoStationError::TokenDirCreation(token_path.clone(), e))?;

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            api: ApiClient::new(base_url, client_id, client_secret),
            store: TokenStore::new(token_path),
            update_interval: update_interval.unwrap_or(DEFAULT_UPDATE_INTERVAL),
        })
    }

    /// The polling interval the host scheduler should use.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Runs one update tick, returning `None` when no data could be
    /// produced. Every failure path is logged; none is fatal to the host.
    pub async fn tick(&self) -> Option<DashboardReading> {
        info!("Updating station data");
        match self.try_tick().await {
            Ok(reading) => Some(reading),
            Err(err) => {
                warn!("Station update failed: {}", err);
                None
            }
        }
    }

    /// Runs one update tick with typed failures, for hosts that want to
    /// inspect the cause instead of just skipping the update.
    ///
    /// The tick's steps run strictly in order: load the stored tokens,
    /// refresh and persist them if expired, fetch the station data with the
    /// (possibly new) access token, and map it to a [`DashboardReading`].
    /// A failed refresh leaves the stored credential file untouched; a
    /// failed persist is logged and the tick proceeds with the refreshed
    /// record held in memory.
    pub async fn try_tick(&self) -> Result<DashboardReading, NetatmoStationError> {
        let tokens = self
            .store
            .load()
            .await
            .ok_or_else(|| NetatmoStationError::MissingTokens(self.store.path().to_path_buf()))?;

        let tokens = if tokens.is_expired(Utc::now()) {
            info!("Access token expired, requesting a refresh");
            let refreshed = self.api.refresh_tokens(&tokens.refresh_token).await?;
            self.store.save(&refreshed).await;
            refreshed
        } else {
            tokens
        };

        let raw = self.api.fetch_station_data(&tokens.access_token).await?;
        Ok(DashboardReading::from_station_data(&raw)?)
    }
}
