use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use weather_core::{CityQuery, GatewayError, WeatherGateway, WeatherPayload};

pub fn router(gateway: WeatherGateway) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/weather", get(get_weather))
        .route("/health", get(health))
        .with_state(gateway);

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(addr: &str, gateway: WeatherGateway) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Weather gateway running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

async fn get_weather(
    State(gateway): State<WeatherGateway>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<WeatherPayload>, ApiError> {
    let query = CityQuery::from_pairs(params);
    Ok(Json(gateway.get_weather(&query).await?))
}

async fn health() -> &'static str {
    "ok"
}

/// JSON error body `{"error": "..."}` with the status the gateway picked.
struct ApiError(GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.public_message() }));
        (self.0.status(), body).into_response()
    }
}
