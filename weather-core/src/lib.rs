//! Core library for the weather gateway.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction and its OpenWeather client
//! - The gateway merging current conditions with a short forecast
//! - Shared payload models and error types
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{GatewayError, ProviderError};
pub use gateway::WeatherGateway;
pub use model::{
    CityQuery, Coordinates, CurrentWeather, DEFAULT_CITY, FORECAST_ENTRIES, ForecastResponse,
    WeatherPayload,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
