//! Weather retrieval: current conditions and the 5-day forecast, fetched as
//! a pair against the same query, unit system and credential.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::types::{CurrentConditions, ForecastResponse, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const UNITS: &str = "metric";

/// Client for the current-conditions and forecast endpoints.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    /// Create a new provider against `base_url` (checked here so a
    /// malformed configuration fails at startup).
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Url::parse(base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch current conditions for a free-text place query.
    pub async fn current(&self, query: &str) -> Result<CurrentConditions, WeatherError> {
        tracing::debug!("Fetching current conditions for {:?}", query);
        let response = self.get("weather", query).await?;
        Ok(response.json().await?)
    }

    /// Fetch the 3-hourly forecast series for a free-text place query.
    pub async fn forecast(&self, query: &str) -> Result<ForecastResponse, WeatherError> {
        tracing::debug!("Fetching forecast for {:?}", query);
        let response = self.get("forecast", query).await?;
        Ok(response.json().await?)
    }

    /// Fetch conditions and forecast concurrently.
    ///
    /// The requests have no ordering dependency but are joined: the pair is
    /// returned only when both succeed, so a caller never observes a
    /// half-updated result.
    pub async fn fetch(
        &self,
        query: &str,
    ) -> Result<(CurrentConditions, ForecastResponse), WeatherError> {
        let (current, forecast) = tokio::try_join!(self.current(query), self.forecast(query))?;

        tracing::info!(
            "Weather data fetched for {:?} ({} forecast entries)",
            query,
            forecast.list.len()
        );
        Ok((current, forecast))
    }

    async fn get(&self, endpoint: &str, query: &str) -> Result<Response, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("units", UNITS), ("appid", &self.api_key)])
            .send()
            .await?;
        check_status(response).await
    }
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

/// Turn a non-2xx response into [`WeatherError::Api`], carrying the error
/// body's message when one can be decoded.
pub(crate) async fn check_status(response: Response) -> Result<Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiMessage>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_default();

    tracing::debug!("API returned {}: {:?}", status, message);
    Err(WeatherError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_base_url() {
        assert!(WeatherProvider::new("not a url", "key").is_err());
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let provider = WeatherProvider::new("https://example.com/data/2.5/", "key").unwrap();
        assert_eq!(provider.base_url, "https://example.com/data/2.5");
    }
}
