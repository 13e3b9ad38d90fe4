use crate::api::error::ApiError;
use crate::tokens::store::TokenRecord;
use chrono::{Duration, Utc};
use log::{info, warn};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;

/// Default API host; tests point `base_url` at a local stub instead.
pub const DEFAULT_BASE_URL: &str = "https://api.netatmo.com";

/// Response body of a successful refresh-token grant.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}

/// Performs the two provider calls: the OAuth2 refresh and the station-data
/// fetch. Holds no token state of its own; the caller passes tokens in.
pub struct ApiClient {
    http: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl ApiClient {
    pub fn new(base_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            client_id,
            client_secret,
        }
    }

    /// Exchanges `refresh_token` for a fresh credential record.
    ///
    /// The returned record's `expires_at` is computed from the grant's
    /// `expires_in` relative to the current time.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenRecord, ApiError> {
        let url = format!("{}/oauth2/token", self.base_url);
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ApiError::NetworkRequest(url.clone(), e))?;
        let response = Self::check_status(response, &url).await?;

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| ApiError::ResponseDecode(url, e))?;
        info!("Refreshed access token, valid for {}s", grant.expires_in);

        Ok(TokenRecord {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: Some(Utc::now() + Duration::seconds(grant.expires_in)),
        })
    }

    /// Fetches the raw station-data document for `access_token`.
    pub async fn fetch_station_data(&self, access_token: &str) -> Result<Value, ApiError> {
        let url = format!("{}/api/getstationsdata", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(|e| ApiError::NetworkRequest(url.clone(), e))?;
        let response = Self::check_status(response, &url).await?;

        let data = response
            .json()
            .await
            .map_err(|e| ApiError::ResponseDecode(url, e))?;
        info!("Obtained station data");
        Ok(data)
    }

    /// Turns any non-2xx response into an [`ApiError::HttpStatus`] carrying
    /// the status and body, both of which also get logged.
    async fn check_status(response: Response, url: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("HTTP error for {}: status {}, body: {}", url, status, body);
        Err(ApiError::HttpStatus {
            url: url.to_string(),
            status,
            body,
        })
    }
}
