use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the upstream weather provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("weather provider returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather provider response is missing `{0}`")]
    MissingField(&'static str),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Transport(e) if e.is_timeout())
    }
}

/// Outcome of a failed `get_weather`, one variant per HTTP answer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Every failure of the current-conditions lookup lands here, whatever the cause.
    #[error("current weather for '{city}' unavailable: {source}")]
    CityNotFound {
        city: String,
        #[source]
        source: ProviderError,
    },

    #[error("forecast unavailable: {source}")]
    ForecastUnavailable {
        #[source]
        source: ProviderError,
    },

    #[error("forecast timed out: {source}")]
    ForecastTimeout {
        #[source]
        source: ProviderError,
    },
}

impl GatewayError {
    pub(crate) fn forecast(source: ProviderError) -> Self {
        if source.is_timeout() {
            GatewayError::ForecastTimeout { source }
        } else {
            GatewayError::ForecastUnavailable { source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::CityNotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::ForecastUnavailable { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::ForecastTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Message safe to show to the front-end; upstream details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::CityNotFound { .. } => "City not found",
            GatewayError::ForecastUnavailable { .. } => "Forecast unavailable",
            GatewayError::ForecastTimeout { .. } => "Forecast timed out",
        }
    }
}
