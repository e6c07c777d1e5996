//! Human-friendly rendering of a [`WeatherPayload`] for the terminal.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde_json::Value;
use weather_core::WeatherPayload;

pub fn render(payload: &WeatherPayload) -> String {
    let current = &payload.current.0;
    let offset = utc_offset(&payload.city_info);

    let name = current["name"].as_str().unwrap_or("Unknown location");
    let location = match current["sys"]["country"].as_str() {
        Some(country) => format!("{name}, {country}"),
        None => name.to_string(),
    };

    let mut out = format!(
        "{location}: {} ({})\n",
        temperature(current),
        description(current)
    );

    for entry in &payload.forecast {
        let when = entry["dt"]
            .as_i64()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.with_timezone(&offset).format("%a %H:%M").to_string())
            .unwrap_or_else(|| "--".to_string());

        out.push_str(&format!(
            "  {when:<9} {:>8}  {}\n",
            temperature(entry),
            description(entry)
        ));
    }

    out
}

/// Offset from `city.timezone` (seconds east of UTC); UTC when absent.
fn utc_offset(city_info: &Value) -> FixedOffset {
    city_info["timezone"]
        .as_i64()
        .and_then(|secs| i32::try_from(secs).ok())
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

fn temperature(value: &Value) -> String {
    value["main"]["temp"]
        .as_f64()
        .map(|t| format!("{t:.1}°C"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn description(value: &Value) -> &str {
    value["weather"][0]["description"].as_str().unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use weather_core::CurrentWeather;

    fn payload() -> WeatherPayload {
        WeatherPayload {
            current: CurrentWeather(json!({
                "name": "London",
                "sys": {"country": "GB"},
                "main": {"temp": 11.44},
                "weather": [{"description": "broken clouds"}]
            })),
            forecast: vec![
                json!({"dt": 1_760_781_600, "main": {"temp": 12.0}, "weather": [{"description": "light rain"}]}),
                json!({"main": {}}),
            ],
            city_info: json!({"name": "London", "timezone": 3600}),
        }
    }

    #[test]
    fn header_line_has_location_and_conditions() {
        let text = render(&payload());
        let first = text.lines().next().unwrap();
        assert_eq!(first, "London, GB: 11.4°C (broken clouds)");
    }

    #[test]
    fn forecast_times_use_city_offset() {
        // 2025-10-18 10:00 UTC, one hour east.
        let text = render(&payload());
        let line = text.lines().nth(1).unwrap();
        assert!(line.contains("Sat 11:00"), "{line}");
        assert!(line.contains("12.0°C"));
        assert!(line.contains("light rain"));
    }

    #[test]
    fn incomplete_entries_render_placeholders() {
        let text = render(&payload());
        let line = text.lines().nth(2).unwrap();
        assert!(line.contains("--"));
        assert!(line.contains("n/a"));
        assert!(line.contains("Unknown"));
    }
}
