//! Amap (高德) live weather client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::WeatherConfig,
    domain::{WeatherError, WeatherProvider, WeatherReport},
};

/// User agent string for weather lookups.
const USER_AGENT: &str = concat!("chaguan/", env!("CARGO_PKG_VERSION"));

/// Raw response of the live weather endpoint
#[derive(Debug, Deserialize)]
struct LiveWeatherResponse {
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    lives: Vec<WeatherReport>,
}

/// Weather provider backed by the Amap REST API
///
/// TLS certificates are validated by reqwest's default configuration.
pub struct AmapWeatherClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl AmapWeatherClient {
    /// Create a client from configuration.
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for AmapWeatherClient {
    async fn lookup(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        if self.api_key.is_empty() {
            return Err(WeatherError::Upstream(
                "weather service is not configured".to_string(),
            ));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("city", city),
                ("extensions", "base"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Upstream(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WeatherError::Upstream(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Upstream(format!("failed to read response: {e}")))?;

        parse_live_response(city, &body)
    }
}

/// Interpret a live weather response body.
fn parse_live_response(city: &str, body: &str) -> Result<WeatherReport, WeatherError> {
    let parsed: LiveWeatherResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::Upstream(format!("invalid response: {e}")))?;

    if parsed.status != "1" {
        return Err(WeatherError::Upstream(parsed.info));
    }

    parsed
        .lives
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
}
