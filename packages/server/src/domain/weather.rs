//! Weather lookup contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Live weather observation for one city
///
/// Field names follow the upstream payload so the report can be forwarded to
/// clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: String,
    pub weather: String,
    pub humidity: String,
    pub winddirection: String,
    pub windpower: String,
    #[serde(default)]
    pub reporttime: String,
}

impl WeatherReport {
    /// Human-readable one-line summary, e.g. `北京天气：晴，温度20℃，湿度40%，东3级`
    pub fn summary(&self) -> String {
        format!(
            "{}天气：{}，温度{}℃，湿度{}%，{}{}级",
            self.city,
            self.weather,
            self.temperature,
            self.humidity,
            self.winddirection,
            self.windpower
        )
    }
}

/// Failure of a weather lookup
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("{0}")]
    Upstream(String),
}

/// External weather collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Look up the current weather for a city
    async fn lookup(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}
