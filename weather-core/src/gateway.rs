use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::GatewayError,
    model::{CityQuery, FORECAST_ENTRIES, WeatherPayload},
    provider::WeatherProvider,
};

/// Resolves a city to current conditions, then fetches the forecast for its
/// coordinates and merges both into one payload.
#[derive(Debug, Clone)]
pub struct WeatherGateway {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherGateway {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn get_weather(&self, query: &CityQuery) -> Result<WeatherPayload, GatewayError> {
        let city = query.city_or_default();
        debug!(city, "resolving weather");

        let current = self.provider.current(city).await.map_err(|source| {
            warn!(city, error = %source, "current weather lookup failed");
            GatewayError::CityNotFound { city: city.to_string(), source }
        })?;

        let coords = current.coordinates().map_err(|source| {
            warn!(city, error = %source, "current weather has no usable coordinates");
            GatewayError::CityNotFound { city: city.to_string(), source }
        })?;

        let (forecast, city_info) = self
            .provider
            .forecast(coords)
            .await
            .and_then(|forecast| forecast.into_parts(FORECAST_ENTRIES))
            .map_err(|source| {
                warn!(city, lat = coords.lat, lon = coords.lon, error = %source, "forecast lookup failed");
                GatewayError::forecast(source)
            })?;

        Ok(WeatherPayload { current, forecast, city_info })
    }
}
