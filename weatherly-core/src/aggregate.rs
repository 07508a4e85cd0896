//! Per-query orchestration: fetch, reconcile, merge.
//!
//! `load_weather` is the single entry point for every query origin — text
//! search, favorite tap, map click, geolocation, capital tiles. The three
//! primary fetches run concurrently and any failure among them is fatal;
//! the supplemental feed is spawned independently and its absence only
//! degrades the daily view.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::derive;
use crate::error::WeatherError;
use crate::model::{
    DailyEntry, DailyForecast, DailyProvenance, ForecastPoint, Locale, Units, WeatherBundle,
};
use crate::provider::openmeteo::{OpenMeteoClient, SupplementalDaily};
use crate::provider::openweather::OpenWeatherClient;

/// Fallback daily views are reconstructed from the 5-day 3-hourly feed and
/// capped at this many entries.
const MAX_FALLBACK_DAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct Aggregator {
    weather: OpenWeatherClient,
    supplemental: OpenMeteoClient,
}

impl Aggregator {
    pub fn new(weather: OpenWeatherClient, supplemental: OpenMeteoClient) -> Self {
        Self { weather, supplemental }
    }

    /// Loads the full bundle for one location. When `display_name` is given
    /// it overrides whatever name the provider returns, so the user keeps
    /// seeing the place they searched for; the country code still comes
    /// from the API.
    pub async fn load_weather(
        &self,
        lat: f64,
        lon: f64,
        display_name: Option<&str>,
        units: Units,
        locale: Locale,
    ) -> Result<WeatherBundle, WeatherError> {
        // Kicked off first and joined last: the supplemental feed's timing
        // must never gate the primary result.
        let supplemental_client = self.supplemental.clone();
        let supplemental_task =
            tokio::spawn(async move { supplemental_client.fetch_daily(lat, lon, units).await });

        let (mut snapshot, hourly, air_quality) = tokio::try_join!(
            self.weather.fetch_current(lat, lon, units, locale),
            self.weather.fetch_forecast(lat, lon, units, locale),
            self.weather.fetch_air_quality(lat, lon),
        )?;

        if let Some(name) = display_name {
            snapshot.location.name = name.to_owned();
        }

        let supplemental = match supplemental_task.await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("supplemental fetch task failed: {err}");
                None
            }
        };

        let (daily, lunar, uv_index_max) = match supplemental {
            Some(feed) => {
                let lunar = feed.lunar.clone();
                let uv = feed.uv_index_max;
                (native_daily(&feed), lunar, uv)
            }
            None => (fallback_daily(&hourly), None, None),
        };

        Ok(WeatherBundle { snapshot, hourly, air_quality, daily, lunar, uv_index_max, units })
    }

    /// Re-runs the whole pipeline for an existing bundle, e.g. after a unit
    /// or locale toggle. Uses the bundle's coordinates and preserved display
    /// name; never geocodes again.
    pub async fn refresh(
        &self,
        bundle: &WeatherBundle,
        units: Units,
        locale: Locale,
    ) -> Result<WeatherBundle, WeatherError> {
        let location = &bundle.snapshot.location;
        self.load_weather(location.lat, location.lon, Some(&location.name), units, locale).await
    }
}

fn native_daily(feed: &SupplementalDaily) -> DailyForecast {
    let entries = feed
        .days
        .iter()
        .map(|day| DailyEntry {
            date: day.date,
            temp_min: day.temp_min,
            temp_max: day.temp_max,
            icon: derive::icon_for_wmo(day.weather_code).to_owned(),
            precipitation_chance: day.precipitation_chance,
            description: None,
        })
        .collect();

    DailyForecast { provenance: DailyProvenance::Native, entries }
}

/// Degraded daily view from the 3-hourly feed: one entry per calendar date
/// in first-encounter order, preferring the noon sample of each date, else
/// that date's first sample.
pub(crate) fn fallback_daily(points: &[ForecastPoint]) -> DailyForecast {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut entries = Vec::new();

    for point in points {
        let date = point.time.date();
        if !seen.insert(date) {
            continue;
        }

        let sample = points
            .iter()
            .find(|p| p.time.date() == date && derive::is_noon(p))
            .unwrap_or(point);

        entries.push(DailyEntry {
            date,
            temp_min: sample.temp_min,
            temp_max: sample.temp_max,
            icon: sample.icon.clone(),
            precipitation_chance: sample.precipitation_chance,
            description: Some(sample.description.clone()),
        });

        if entries.len() == MAX_FALLBACK_DAYS {
            break;
        }
    }

    DailyForecast { provenance: DailyProvenance::Fallback, entries }
}
