use crate::model::WeatherObservation;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// A source of current weather observations.
///
/// The archiver only depends on this seam, so the run loop can be exercised
/// against stub sources in tests.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, city: &str) -> anyhow::Result<WeatherObservation>;
}
