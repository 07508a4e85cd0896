//! Core library for the Weatherly dashboard.
//!
//! This crate defines:
//! - Provider clients for the two weather APIs (current/forecast/air
//!   quality, and the supplemental 10-day/lunar feed)
//! - The aggregator that merges both into one snapshot bundle per query
//! - Pure derivations (AQI band, wind compass, moon phase, clothing and
//!   activity suggestions, daylight duration)
//! - Geocoding, autocomplete and persisted favorites/preferences
//!
//! It is used by `weatherly-cli`, but can also be reused by other front
//! ends; everything visual is a consumer of this crate's output.

pub mod aggregate;
pub mod capability;
pub mod config;
pub mod derive;
pub mod error;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod search;

pub use aggregate::Aggregator;
pub use config::Config;
pub use error::WeatherError;
pub use geocode::GeoResolver;
pub use model::{
    AirQuality, Condition, DailyEntry, DailyForecast, DailyProvenance, ForecastPoint, HourlyPoint,
    Locale, Location, LunarInfo, Units, WeatherBundle, WeatherSnapshot, Wind, WORLD_CAPITALS,
};
pub use provider::{openmeteo::OpenMeteoClient, openweather::OpenWeatherClient};
pub use search::SuggestionService;
