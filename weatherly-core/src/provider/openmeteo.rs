use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::error::WeatherError;
use crate::model::{LunarInfo, Units};

use super::truncate_body;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,uv_index_max,\
precipitation_probability_max,moon_phase,moonrise,moonset";
const FORECAST_DAYS: u8 = 10;
const MOON_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// One day of the supplemental feed, still carrying the provider's WMO
/// weather code; translation into the primary icon vocabulary happens
/// downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplementalDay {
    pub date: NaiveDate,
    pub weather_code: u16,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Probability of precipitation in percent.
    pub precipitation_chance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplementalDaily {
    pub days: Vec<SupplementalDay>,
    pub lunar: Option<LunarInfo>,
    /// Today's UV index maximum.
    pub uv_index_max: Option<f64>,
}

/// Client for the supplemental 10-day provider. A soft dependency: every
/// failure degrades to `None` with a warn-level log line, never an error.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    pub async fn fetch_daily(&self, lat: f64, lon: f64, units: Units) -> Option<SupplementalDaily> {
        match self.try_fetch_daily(lat, lon, units).await {
            Ok(daily) => Some(daily),
            Err(err) => {
                tracing::warn!("supplemental daily forecast unavailable: {err}");
                None
            }
        }
    }

    async fn try_fetch_daily(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<SupplementalDaily, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("temperature_unit", units.temperature_unit().to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Fetch {
                endpoint: "daily forecast",
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse = serde_json::from_str(&body)
            .map_err(|source| WeatherError::Parse { endpoint: "daily forecast", source })?;

        Ok(supplemental_from(parsed.daily))
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

fn supplemental_from(daily: OmDaily) -> SupplementalDaily {
    let days = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| SupplementalDay {
            date: *date,
            weather_code: daily.weather_code.get(i).copied().unwrap_or_default(),
            temp_min: daily.temperature_2m_min.get(i).copied().unwrap_or_default(),
            temp_max: daily.temperature_2m_max.get(i).copied().unwrap_or_default(),
            precipitation_chance: daily.precipitation_probability_max.get(i).copied().flatten(),
        })
        .collect();

    let lunar = daily.moon_phase.first().copied().flatten().map(|phase| LunarInfo {
        phase,
        moonrise: first_moon_time(&daily.moonrise),
        moonset: first_moon_time(&daily.moonset),
    });

    SupplementalDaily { days, lunar, uv_index_max: daily.uv_index_max.first().copied().flatten() }
}

fn first_moon_time(times: &[Option<String>]) -> Option<NaiveDateTime> {
    times
        .first()?
        .as_deref()
        .and_then(|s| NaiveDateTime::parse_from_str(s, MOON_TIME_FORMAT).ok())
}

// Daily arrays are index-aligned; missing arrays default to empty so a
// partial payload degrades per-field instead of failing the parse.
#[derive(Debug, Deserialize)]
struct OmResponse {
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    #[serde(default)]
    weather_code: Vec<u16>,
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    uv_index_max: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    moon_phase: Vec<Option<f64>>,
    #[serde(default)]
    moonrise: Vec<Option<String>>,
    #[serde(default)]
    moonset: Vec<Option<String>>,
}
