//! Core library for the weather archiver.
//!
//! This crate defines:
//! - Configuration loading from the process environment
//! - The observation model shared by fetch and archive
//! - Abstractions over the weather API and the object store
//! - The archiver that ties them together
//!
//! It is used by `archiver-cli`, but can also be reused by other binaries or services.

pub mod archiver;
pub mod config;
pub mod model;
pub mod storage;
pub mod weather;

pub use archiver::{Archiver, BucketStatus, storage_key};
pub use config::{Config, Units};
pub use model::{TIMESTAMP_FORMAT, WeatherObservation, WeatherSummary};
pub use storage::{ObjectStore, StorageError};
pub use weather::{OpenWeatherClient, WeatherSource};
