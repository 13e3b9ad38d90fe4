//! Host-facing sensor surface: a fixed name, the Temperature reading as the
//! primary state, and the full flattened record as auxiliary attributes.

use crate::error::NetatmoStationError;
use crate::netatmo::NetatmoStation;
use crate::types::dashboard::DashboardReading;
use std::time::Duration;

const SENSOR_NAME: &str = "Netatmo Station";

/// Holds the latest reading produced by a [`NetatmoStation`].
///
/// The host registers one of these, polls [`StationSensor::update`] on the
/// station's interval, and renders [`StationSensor::state`] plus the full
/// [`StationSensor::reading`]. A tick that produces no data clears the held
/// state until the next successful update.
pub struct StationSensor {
    station: NetatmoStation,
    reading: Option<DashboardReading>,
}

impl StationSensor {
    /// Runs the first update tick and wraps the station in a sensor.
    ///
    /// # Errors
    ///
    /// Returns [`NetatmoStationError::InitialUpdate`] when the first tick
    /// yields no data, so a misconfigured station never gets registered.
    pub async fn initialize(station: NetatmoStation) -> Result<Self, NetatmoStationError> {
        let reading = station
            .tick()
            .await
            .ok_or(NetatmoStationError::InitialUpdate)?;
        Ok(Self {
            station,
            reading: Some(reading),
        })
    }

    pub fn name(&self) -> &'static str {
        SENSOR_NAME
    }

    /// The primary displayed value: the current temperature, if any.
    pub fn state(&self) -> Option<f64> {
        self.reading.as_ref().map(|reading| reading.temperature)
    }

    /// The full flattened record backing the auxiliary attributes.
    pub fn reading(&self) -> Option<&DashboardReading> {
        self.reading.as_ref()
    }

    /// The polling interval the host scheduler should use.
    pub fn update_interval(&self) -> Duration {
        self.station.update_interval()
    }

    /// Runs one tick and replaces the held reading with its outcome.
    pub async fn update(&mut self) {
        self.reading = self.station.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::store::{TokenRecord, TokenStore};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::{Duration as ChronoDuration, Utc};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    /// Stub station-data endpoint that succeeds for the first `successes`
    /// requests and answers 500 afterwards.
    async fn spawn_flaky_fetch(successes: usize) -> String {
        let served = Arc::new(AtomicUsize::new(0));
        let app = Router::new().route(
            "/api/getstationsdata",
            get(move || {
                let served = Arc::clone(&served);
                async move {
                    if served.fetch_add(1, Ordering::SeqCst) < successes {
                        (
                            StatusCode::OK,
                            Json(json!({
                                "body": {
                                    "devices": [
                                        {
                                            "dashboard_data": {
                                                "Temperature": 19.2,
                                                "CO2": 455,
                                                "Humidity": 51,
                                                "Noise": 35,
                                                "Pressure": 1009.1,
                                                "AbsolutePressure": 1004.6,
                                                "temp_trend": "down",
                                                "pressure_trend": "up",
                                            }
                                        }
                                    ]
                                }
                            })),
                        )
                    } else {
                        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})))
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        format!("http://{}", addr)
    }

    async fn station_with(base_url: String, dir: &std::path::Path) -> NetatmoStation {
        let token_path = dir.join("tokens.json");
        TokenStore::new(&token_path)
            .save(&TokenRecord {
                access_token: "stored-access".to_string(),
                refresh_token: "stored-refresh".to_string(),
                expires_at: Some(Utc::now() + ChronoDuration::hours(1)),
            })
            .await;

        NetatmoStation::builder()
            .client_id("client-id".to_string())
            .client_secret("client-secret".to_string())
            .token_path(token_path)
            .base_url(base_url)
            .build()
            .await
            .expect("station builds")
    }

    #[tokio::test]
    async fn initialize_exposes_temperature_state_and_attributes() {
        let base_url = spawn_flaky_fetch(1).await;
        let dir = tempdir().expect("create temp dir");
        let station = station_with(base_url, dir.path()).await;

        let sensor = StationSensor::initialize(station)
            .await
            .expect("first tick has data");

        assert_eq!(sensor.name(), "Netatmo Station");
        assert_eq!(sensor.state(), Some(19.2));
        let reading = sensor.reading().expect("reading held");
        assert_eq!(reading.co2, 455.0);
        assert_eq!(reading.temperature_trend, "down");
    }

    #[tokio::test]
    async fn initialize_fails_when_first_tick_has_no_data() {
        let base_url = spawn_flaky_fetch(0).await;
        let dir = tempdir().expect("create temp dir");
        let station = station_with(base_url, dir.path()).await;

        let result = StationSensor::initialize(station).await;
        assert!(matches!(result, Err(NetatmoStationError::InitialUpdate)));
    }

    #[tokio::test]
    async fn failed_update_clears_the_held_state() {
        let base_url = spawn_flaky_fetch(1).await;
        let dir = tempdir().expect("create temp dir");
        let station = station_with(base_url, dir.path()).await;

        let mut sensor = StationSensor::initialize(station)
            .await
            .expect("first tick has data");
        assert!(sensor.state().is_some());

        sensor.update().await;
        assert_eq!(sensor.state(), None);
        assert!(sensor.reading().is_none());
    }
}
