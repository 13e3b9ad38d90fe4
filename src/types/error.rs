use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("Station data has no 'body.devices[0]' entry")]
    MissingDevice,

    #[error("Device has no 'dashboard_data' block")]
    MissingDashboardData,

    #[error("Dashboard block has missing or malformed fields")]
    Malformed(#[source] serde_json::Error),
}
