use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{config::Units, model::WeatherObservation};

use super::WeatherSource;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Client for the OpenWeather current-weather endpoint.
///
/// One GET per call, no retries; the process relies on reqwest's default
/// timeout behavior.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    units: Units,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            units,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherObservation> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        decode_response(status, &body)
    }
}

/// Turn a raw status + body into an observation.
///
/// Kept separate from the transport so the error paths are testable without
/// a live endpoint.
fn decode_response(status: StatusCode, body: &str) -> Result<WeatherObservation> {
    if !status.is_success() {
        return Err(anyhow!(
            "OpenWeather current request failed with status {}: {}",
            status,
            truncate_body(body),
        ));
    }

    let raw: Value =
        serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;

    WeatherObservation::from_value(raw)
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherObservation> {
        if city.trim().is_empty() {
            bail!("City name must not be empty");
        }

        self.fetch_current(city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
