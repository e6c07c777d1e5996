use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::ProviderError,
    model::{Coordinates, CurrentWeather, ForecastResponse},
    provider::truncate_body,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ProviderError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "calling OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        self.get_json("weather", &[("q", city)]).await.map(CurrentWeather)
    }

    async fn forecast(&self, coords: Coordinates) -> Result<ForecastResponse, ProviderError> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();

        self.get_json("forecast", &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await
            .map(ForecastResponse)
    }
}
