use crate::{
    Config,
    error::ProviderError,
    model::{Coordinates, CurrentWeather, ForecastResponse},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name.
    async fn current(&self, city: &str) -> Result<CurrentWeather, ProviderError>;

    /// Forecast for a resolved location.
    async fn forecast(&self, coords: Coordinates) -> Result<ForecastResponse, ProviderError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error: requests go out with an empty `appid`
/// and the upstream rejection surfaces as a failed lookup.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let mut provider =
        OpenWeatherProvider::new(config.api_key().to_owned()).with_base_url(config.base_url());

    if let Some(timeout) = config.request_timeout() {
        provider = provider.with_timeout(timeout)?;
    }

    Ok(Arc::new(provider))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
