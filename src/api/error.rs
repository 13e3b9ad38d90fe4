use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode response body for {0}")]
    ResponseDecode(String, #[source] reqwest::Error),
}
