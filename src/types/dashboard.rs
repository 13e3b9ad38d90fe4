//! The flattened dashboard record handed back to the host, and the mapping
//! from the provider's nested station-data document.

use crate::types::error::ReadingError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One snapshot of a station's current readings.
///
/// Deserialized straight from the provider's `dashboard_data` block (which
/// names the trend fields `temp_trend`/`pressure_trend`); serialized under
/// the canonical attribute names the host displays. Recomputed on every
/// fetch, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReading {
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "CO2")]
    pub co2: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Noise")]
    pub noise: f64,
    #[serde(rename = "Pressure")]
    pub pressure: f64,
    #[serde(rename = "AbsolutePressure")]
    pub absolute_pressure: f64,
    #[serde(rename(serialize = "TemperatureTrend", deserialize = "temp_trend"))]
    pub temperature_trend: String,
    #[serde(rename(serialize = "PressureTrend", deserialize = "pressure_trend"))]
    pub pressure_trend: String,
}

impl DashboardReading {
    /// Maps a raw station-data response to a flat reading.
    ///
    /// Descends the fixed path `body.devices[0].dashboard_data`; any missing
    /// key or index along the way, or a malformed field inside the dashboard
    /// block, yields a [`ReadingError`]. Extra provider fields are ignored.
    pub fn from_station_data(raw: &Value) -> Result<Self, ReadingError> {
        let device = raw
            .get("body")
            .and_then(|body| body.get("devices"))
            .and_then(|devices| devices.get(0))
            .ok_or(ReadingError::MissingDevice)?;
        let dashboard = device
            .get("dashboard_data")
            .ok_or(ReadingError::MissingDashboardData)?;
        serde_json::from_value(dashboard.clone()).map_err(ReadingError::Malformed)
    }
}
