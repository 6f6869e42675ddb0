use anyhow::{Result, anyhow};
use std::env;

/// Environment variable holding the OpenWeather API key.
pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";

/// Environment variable holding the target storage bucket name.
pub const ENV_BUCKET_NAME: &str = "AWS_BUCKET_NAME";

/// Optional environment variable selecting the unit system.
pub const ENV_UNITS: &str = "WEATHER_UNITS";

/// Unit system passed to the weather API and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Units {
    Imperial,
    Metric,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
            Units::Standard => "standard",
        }
    }

    /// Temperature symbol for human-readable output.
    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Imperial => "°F",
            Units::Metric => "°C",
            Units::Standard => "K",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Imperial, Units::Metric, Units::Standard]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "imperial" => Ok(Units::Imperial),
            "metric" => Ok(Units::Metric),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow!(
                "Unknown unit system '{value}'. Supported units: imperial, metric, standard."
            )),
        }
    }
}

/// Runtime configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub bucket_name: String,
    pub units: Units,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Fails before any network or storage call if a required value is
    /// absent or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an injected lookup, so tests never touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = require(&lookup, ENV_API_KEY)?;
        let bucket_name = require(&lookup, ENV_BUCKET_NAME)?;

        let units = match lookup(ENV_UNITS) {
            Some(value) if !value.trim().is_empty() => Units::try_from(value.trim())?,
            _ => Units::Imperial,
        };

        Ok(Self { api_key, bucket_name, units })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).filter(|value| !value.trim().is_empty()).ok_or_else(|| {
        anyhow!(
            "Missing required environment variable {key}.\n\
             Hint: set {key} (e.g. in a .env file) before running the archiver."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn loads_required_values() {
        let cfg = Config::from_lookup(env(&[
            (ENV_API_KEY, "KEY"),
            (ENV_BUCKET_NAME, "weather-archive"),
        ]))
        .expect("config must load");

        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.bucket_name, "weather-archive");
        assert_eq!(cfg.units, Units::Imperial);
    }

    #[test]
    fn missing_api_key_fails_fast() {
        let err = Config::from_lookup(env(&[(ENV_BUCKET_NAME, "weather-archive")])).unwrap_err();

        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn missing_bucket_name_fails_fast() {
        let err = Config::from_lookup(env(&[(ENV_API_KEY, "KEY")])).unwrap_err();

        assert!(err.to_string().contains(ENV_BUCKET_NAME));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = Config::from_lookup(env(&[
            (ENV_API_KEY, "   "),
            (ENV_BUCKET_NAME, "weather-archive"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn units_come_from_environment() {
        let cfg = Config::from_lookup(env(&[
            (ENV_API_KEY, "KEY"),
            (ENV_BUCKET_NAME, "weather-archive"),
            (ENV_UNITS, "metric"),
        ]))
        .expect("config must load");

        assert_eq!(cfg.units, Units::Metric);
    }

    #[test]
    fn unknown_units_are_a_configuration_error() {
        let err = Config::from_lookup(env(&[
            (ENV_API_KEY, "KEY"),
            (ENV_BUCKET_NAME, "weather-archive"),
            (ENV_UNITS, "kelvinish"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let parsed = Units::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }
}
