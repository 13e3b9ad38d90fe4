mod api;
mod error;
mod netatmo;
mod sensor;
mod tokens;
mod types;
mod utils;

pub use error::NetatmoStationError;
pub use netatmo::{NetatmoStation, DEFAULT_UPDATE_INTERVAL};
pub use sensor::StationSensor;

pub use api::client::{ApiClient, DEFAULT_BASE_URL};
pub use api::error::ApiError;
pub use tokens::error::TokenStoreError;
pub use tokens::store::{TokenRecord, TokenStore};
pub use types::dashboard::DashboardReading;
pub use types::error::ReadingError;
