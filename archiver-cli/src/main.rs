//! Binary crate for the weather archiver.
//!
//! Loads configuration from the environment, then for each city in the
//! fixed list: fetches the current weather, prints the display fields, and
//! archives the full response to the storage bucket. No flags; the city
//! list and unit system defaults are compiled in.

use anyhow::Result;
use archiver_core::{Archiver, BucketStatus, Config, OpenWeatherClient, storage::S3Store};

const CITIES: [&str; 3] = ["Accra", "Kumasi", "Tamale"];

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    // The only fatal path: fail before any network or storage call.
    let config = Config::from_env()?;

    let store = S3Store::from_env(config.bucket_name.clone()).await;
    let source = OpenWeatherClient::new(config.api_key.clone(), config.units);
    let archiver = Archiver::new(Box::new(source), Box::new(store));

    run(&archiver, config.units.symbol()).await;

    Ok(())
}

async fn run(archiver: &Archiver, degree_symbol: &str) {
    // A failed probe or create is reported but does not abort the run; a
    // genuinely missing bucket makes the per-city saves fail loudly below.
    match archiver.ensure_bucket_exists().await {
        Ok(BucketStatus::AlreadyExists) => {
            println!("Bucket {} already exists", archiver.bucket());
        }
        Ok(BucketStatus::Created) => {
            println!("Created bucket {}", archiver.bucket());
        }
        Err(err) => {
            println!("Could not ensure bucket {} exists: {err}", archiver.bucket());
        }
    }

    for city in CITIES {
        println!("\nFetching weather for {city}...");

        let observation = match archiver.fetch_weather(city).await {
            Ok(observation) => observation,
            Err(err) => {
                println!("Failed to fetch weather data for {city}: {err:#}");
                continue;
            }
        };

        let summary = observation.summary();
        println!("Temperature: {}{degree_symbol}", summary.main.temp);
        println!("Feels like: {}{degree_symbol}", summary.main.feels_like);
        println!("Humidity: {}%", summary.main.humidity);
        println!("Conditions: {}", summary.primary_condition());

        match archiver.save(&observation, city).await {
            Ok(_key) => println!("Weather data for {city} saved to S3!"),
            Err(err) => println!("Failed to save weather data for {city}: {err}"),
        }
    }
}
