use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;

/// City used when the query string carries none.
pub const DEFAULT_CITY: &str = "London";

/// Number of forecast entries handed to the front-end (24h in 3-hour steps).
pub const FORECAST_ENTRIES: usize = 8;

/// Query string of `GET /api/weather`.
#[derive(Debug, Clone, Default)]
pub struct CityQuery {
    pub city: Option<String>,
}

impl CityQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: Some(city.into()) }
    }

    /// Builds the query from decoded key/value pairs; a repeated `city` keeps the last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let city = pairs
            .into_iter()
            .filter(|(key, _)| key == "city")
            .map(|(_, value)| value)
            .last();
        Self { city }
    }

    /// The requested city as given, or [`DEFAULT_CITY`] when the parameter is absent.
    pub fn city_or_default(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_CITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions exactly as returned upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentWeather(pub Value);

impl CurrentWeather {
    pub fn coordinates(&self) -> Result<Coordinates, ProviderError> {
        let lat = self.0.pointer("/coord/lat").and_then(Value::as_f64);
        let lon = self.0.pointer("/coord/lon").and_then(Value::as_f64);

        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            (None, _) => Err(ProviderError::MissingField("coord.lat")),
            (_, None) => Err(ProviderError::MissingField("coord.lon")),
        }
    }
}

/// Forecast exactly as returned upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastResponse(pub Value);

impl ForecastResponse {
    /// Splits into the first `limit` entries of `list` and the `city` object.
    pub fn into_parts(self, limit: usize) -> Result<(Vec<Value>, Value), ProviderError> {
        let Value::Object(mut obj) = self.0 else {
            return Err(ProviderError::MissingField("list"));
        };

        let entries = match obj.remove("list") {
            Some(Value::Array(list)) => list.into_iter().take(limit).collect(),
            _ => return Err(ProviderError::MissingField("list")),
        };
        let city = obj.remove("city").unwrap_or(Value::Null);

        Ok((entries, city))
    }
}

/// Body of a successful `GET /api/weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub current: CurrentWeather,
    pub forecast: Vec<Value>,
    pub city_info: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn city_defaults_to_london_only_when_absent() {
        assert_eq!(CityQuery::default().city_or_default(), "London");
        assert_eq!(CityQuery::new("").city_or_default(), "");
        assert_eq!(CityQuery::new("New York").city_or_default(), "New York");
    }

    #[test]
    fn repeated_city_keeps_last_value() {
        let pairs = vec![
            ("city".to_string(), "Atlantis".to_string()),
            ("units".to_string(), "imperial".to_string()),
            ("city".to_string(), "Paris".to_string()),
        ];
        assert_eq!(CityQuery::from_pairs(pairs).city.as_deref(), Some("Paris"));
    }

    #[test]
    fn pairs_without_city_default() {
        let pairs = vec![("q".to_string(), "Paris".to_string())];
        assert_eq!(CityQuery::from_pairs(pairs).city_or_default(), "London");
    }

    #[test]
    fn coordinates_are_read_from_coord() {
        let current = CurrentWeather(json!({"coord": {"lat": 51.51, "lon": -0.13}, "name": "London"}));
        let coords = current.coordinates().expect("coord present");
        assert_eq!(coords, Coordinates { lat: 51.51, lon: -0.13 });
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let current = CurrentWeather(json!({"coord": {"lat": 10, "lon": 20}}));
        assert_eq!(current.coordinates().unwrap(), Coordinates { lat: 10.0, lon: 20.0 });
    }

    #[test]
    fn missing_coordinates_are_reported() {
        let current = CurrentWeather(json!({"coord": {"lon": 1.0}}));
        let err = current.coordinates().unwrap_err();
        assert!(err.to_string().contains("coord.lat"));

        let current = CurrentWeather(json!({"name": "Nowhere"}));
        assert!(current.coordinates().is_err());
    }

    #[test]
    fn forecast_is_truncated_to_limit() {
        let list: Vec<Value> = (0..40).map(|i| json!({"dt": i})).collect();
        let forecast = ForecastResponse(json!({"list": list, "city": {"name": "London"}}));

        let (entries, city) = forecast.into_parts(FORECAST_ENTRIES).unwrap();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0], json!({"dt": 0}));
        assert_eq!(entries[7], json!({"dt": 7}));
        assert_eq!(city, json!({"name": "London"}));
    }

    #[test]
    fn short_forecast_passes_through() {
        let forecast = ForecastResponse(json!({"list": [{"dt": 1}, {"dt": 2}]}));
        let (entries, city) = forecast.into_parts(FORECAST_ENTRIES).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(city, Value::Null);
    }

    #[test]
    fn forecast_without_list_is_an_error() {
        let forecast = ForecastResponse(json!({"cod": "401"}));
        assert!(forecast.into_parts(FORECAST_ENTRIES).is_err());
    }

    #[test]
    fn payload_serializes_with_frontend_keys() {
        let payload = WeatherPayload {
            current: CurrentWeather(json!({"name": "London"})),
            forecast: vec![json!({"dt": 1})],
            city_info: json!({"name": "London"}),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "current": {"name": "London"},
                "forecast": [{"dt": 1}],
                "city_info": {"name": "London"}
            })
        );
    }
}
