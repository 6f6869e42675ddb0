use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Capture timestamp format used in both the storage key and the archived
/// body. Sortable, no timezone ambiguity (always UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub description: String,
}

/// The display fields extracted from a weather API response.
///
/// `weather` is an ordered sequence; the primary condition is element 0.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSummary {
    pub main: MainReadings,
    pub weather: Vec<Condition>,
}

impl WeatherSummary {
    pub fn primary_condition(&self) -> &str {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("unknown")
    }
}

/// One decoded weather API response for one city at one instant.
///
/// Keeps the full body so the archive preserves every field the API
/// returned, alongside the typed summary used for display.
#[derive(Debug, Clone)]
pub struct WeatherObservation {
    raw: Value,
    summary: WeatherSummary,
}

impl WeatherObservation {
    pub fn from_value(raw: Value) -> Result<Self> {
        let summary: WeatherSummary = serde_json::from_value(raw.clone())
            .context("Weather payload is missing required fields (main.temp, main.feels_like, main.humidity, weather)")?;

        if summary.weather.is_empty() {
            bail!("Weather payload contained no condition entries");
        }

        Ok(Self { raw, summary })
    }

    /// An observation with an empty body, for exercising the save guard.
    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> Self {
        Self {
            raw: Value::Object(serde_json::Map::new()),
            summary: WeatherSummary {
                main: MainReadings { temp: 0.0, feels_like: 0.0, humidity: 0 },
                weather: Vec::new(),
            },
        }
    }

    pub fn summary(&self) -> &WeatherSummary {
        &self.summary
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.as_object().is_none_or(|map| map.is_empty())
    }

    /// Serialize the full body with an injected `timestamp` field.
    ///
    /// The original fields pass through untouched; only `timestamp` is
    /// added.
    pub fn archived(&self, captured_at: DateTime<Utc>) -> Result<Vec<u8>> {
        let mut body = self.raw.clone();

        let Some(map) = body.as_object_mut() else {
            bail!("Observation body is not a JSON object");
        };

        map.insert(
            "timestamp".to_string(),
            Value::String(captured_at.format(TIMESTAMP_FORMAT).to_string()),
        );

        serde_json::to_vec(&body).context("Failed to serialize archived observation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixture() -> Value {
        json!({
            "name": "Accra",
            "dt": 1709647642,
            "main": { "temp": 88.3, "feels_like": 94.1, "humidity": 70, "pressure": 1011 },
            "weather": [
                { "description": "scattered clouds", "main": "Clouds" },
                { "description": "haze", "main": "Haze" }
            ]
        })
    }

    #[test]
    fn parses_required_fields() {
        let observation = WeatherObservation::from_value(fixture()).expect("fixture must parse");
        let summary = observation.summary();

        assert_eq!(summary.main.temp, 88.3);
        assert_eq!(summary.main.feels_like, 94.1);
        assert_eq!(summary.main.humidity, 70);
    }

    #[test]
    fn primary_condition_is_first_element() {
        let observation = WeatherObservation::from_value(fixture()).expect("fixture must parse");

        assert_eq!(observation.summary().primary_condition(), "scattered clouds");
    }

    #[test]
    fn missing_main_is_an_error() {
        let err = WeatherObservation::from_value(json!({ "weather": [] })).unwrap_err();

        assert!(err.to_string().contains("missing required fields"));
    }

    #[test]
    fn empty_condition_list_is_an_error() {
        let mut raw = fixture();
        raw["weather"] = json!([]);

        let err = WeatherObservation::from_value(raw).unwrap_err();

        assert!(err.to_string().contains("no condition entries"));
    }

    #[test]
    fn archived_body_keeps_original_fields_and_adds_timestamp() {
        let observation = WeatherObservation::from_value(fixture()).expect("fixture must parse");
        let captured_at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 22).unwrap();

        let bytes = observation.archived(captured_at).expect("archive must serialize");
        let body: Value = serde_json::from_slice(&bytes).expect("archive must be valid JSON");

        assert_eq!(body["timestamp"], "20240305-140722");
        assert_eq!(body["name"], "Accra");
        assert_eq!(body["main"]["pressure"], 1011);
        assert_eq!(body["weather"][0]["description"], "scattered clouds");
    }
}
