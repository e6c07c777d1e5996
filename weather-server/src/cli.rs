use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing::warn;
use weather_core::{CityQuery, Config, WeatherGateway, provider_from_config};

use crate::{report, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API serving `GET /api/weather`.
    Serve {
        /// Listen address, overrides `bind_addr` / WEATHER_BIND_ADDR.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather and the short forecast for a city.
    Show {
        /// City name; London when omitted.
        city: Option<String>,

        /// Print the raw JSON payload instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let config = runtime_config()?;
                let gateway = build_gateway(&config)?;
                let addr = bind.unwrap_or_else(|| config.bind_addr().to_string());

                server::serve(&addr, gateway).await
            }
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let config = runtime_config()?;
                let gateway = build_gateway(&config)?;
                let query = CityQuery { city };

                let payload = gateway.get_weather(&query).await.with_context(|| {
                    format!("Could not get weather for '{}'", query.city_or_default())
                })?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                } else {
                    print!("{}", report::render(&payload));
                }
                Ok(())
            }
        }
    }
}

/// Config file overlaid with the environment (including `.env`).
fn runtime_config() -> anyhow::Result<Config> {
    Config::load()?.apply_env()
}

fn build_gateway(config: &Config) -> anyhow::Result<WeatherGateway> {
    if !config.has_api_key() {
        warn!(
            "No OpenWeather API key configured; upstream calls will be rejected. \
             Hint: run `weather configure` or set WEATHER_API_KEY."
        );
    }

    Ok(WeatherGateway::new(provider_from_config(config)?))
}

fn configure() -> anyhow::Result<()> {
    // Only the file, so env overrides are not persisted.
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    let path = config.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}
