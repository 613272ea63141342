use std::time::Duration;

use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use url::Url;

use crate::{config::ApiSettings, error::ApiError, utils};

pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Thin wrapper around `reqwest::Client` that knows the catalog API's
/// rate limiting and "not found" conventions.
#[derive(Debug, Clone)]
pub struct TidalClient {
    http: Client,
    settings: ApiSettings,
}

impl TidalClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: ApiSettings) -> Self {
        Self { http, settings }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Canonical request URL for `raw` (see [`super::url::normalize`]).
    pub fn url(&self, raw: &str) -> Option<Url> {
        super::url::normalize(raw, &self.settings)
    }

    /// Sleeps for the courtesy delay applied before every catalog request.
    pub async fn throttle(&self) {
        if !self.settings.request_delay.is_zero() {
            sleep(self.settings.request_delay).await;
        }
    }

    /// GETs `url` and decodes the JSON:API body.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(body))` on a success status
    /// - `Ok(None)` on 404, meaning the resource is absent
    /// - `Err(ApiError::Http)` on any other error status, without retrying
    /// - `Err(ApiError::RetryBudgetExhausted)` when every attempt got 429
    ///
    /// # Rate Limiting
    ///
    /// A 429 is answered by waiting `retry-after / retry_after_divisor`
    /// (5 seconds assumed when the header is missing) and sending the same
    /// request again, up to `max_retries` attempts in total. With the
    /// default divisor of 3 only a third of the advertised time is waited.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &Url,
        token: &str,
    ) -> Result<Option<T>, ApiError> {
        let attempts = self.settings.max_retries.max(1);

        for attempt in 1..=attempts {
            let response = self
                .http
                .get(url.clone())
                .bearer_auth(token)
                .header(ACCEPT, JSON_API_MEDIA_TYPE)
                .send()
                .await?;

            match response.status() {
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempt == attempts {
                        break;
                    }

                    let retry_after = self.retry_after(response.headers());
                    sleep(utils::scaled_retry_after(
                        retry_after,
                        self.settings.retry_after_divisor,
                    ))
                    .await;
                    continue; // retry
                }
                StatusCode::NOT_FOUND => return Ok(None),
                status if !status.is_success() => return Err(ApiError::Http { status }),
                _ => {}
            }

            let body = response.bytes().await?;
            return Ok(Some(serde_json::from_slice(&body)?));
        }

        Err(ApiError::RetryBudgetExhausted { attempts })
    }

    fn retry_after(&self, headers: &reqwest::header::HeaderMap) -> Duration {
        headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(self.settings.default_retry_after)
    }
}
