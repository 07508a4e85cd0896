use chrono::{NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::WeatherError;
use crate::model::{
    AirQuality, Condition, ForecastPoint, Locale, Location, Units, WeatherSnapshot, Wind,
};

use super::{truncate_body, unix_to_utc};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const GEOCODE_LIMIT: u8 = 5;
const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Client for the primary provider: current conditions, 5-day/3-hour
/// forecast, air quality and direct geocoding. Every non-success response
/// is a fatal fetch error; tolerating absence is the aggregator's business.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Same client against a different host; tests point this at a local
    /// mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    pub async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        locale: Locale,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self
            .get_json(
                "current weather",
                "/data/2.5/weather",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("appid", self.api_key.clone()),
                    ("units", units.as_str().to_string()),
                    ("lang", locale.as_str().to_string()),
                ],
            )
            .await?;

        Ok(snapshot_from(parsed))
    }

    /// Current conditions looked up by `"Name, CC"` query instead of
    /// coordinates; used for the capital and major-city tiles.
    pub async fn fetch_current_by_name(
        &self,
        query: &str,
        units: Units,
        locale: Locale,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self
            .get_json(
                "current weather",
                "/data/2.5/weather",
                &[
                    ("q", query.to_string()),
                    ("appid", self.api_key.clone()),
                    ("units", units.as_str().to_string()),
                    ("lang", locale.as_str().to_string()),
                ],
            )
            .await?;

        Ok(snapshot_from(parsed))
    }

    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        locale: Locale,
    ) -> Result<Vec<ForecastPoint>, WeatherError> {
        let parsed: OwForecastResponse = self
            .get_json(
                "forecast",
                "/data/2.5/forecast",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("appid", self.api_key.clone()),
                    ("units", units.as_str().to_string()),
                    ("lang", locale.as_str().to_string()),
                ],
            )
            .await?;

        Ok(parsed.list.into_iter().map(forecast_point).collect())
    }

    /// AQI time series; the first entry is "current". An empty series is
    /// tolerated as absence, not an error.
    pub async fn fetch_air_quality(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Option<AirQuality>, WeatherError> {
        let parsed: OwAirResponse = self
            .get_json(
                "air quality",
                "/data/2.5/air_pollution",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await?;

        Ok(parsed.list.first().map(|entry| AirQuality { aqi: entry.main.aqi }))
    }

    /// Direct geocoding, up to 5 candidates in provider order (roughly by
    /// population).
    pub async fn geocode(&self, query: &str) -> Result<Vec<Location>, WeatherError> {
        let parsed: Vec<OwGeoEntry> = self
            .get_json(
                "geocoding",
                "/geo/1.0/direct",
                &[
                    ("q", query.to_string()),
                    ("limit", GEOCODE_LIMIT.to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await?;

        Ok(parsed
            .into_iter()
            .map(|entry| Location {
                name: entry.name,
                country: entry.country,
                state: entry.state,
                lat: entry.lat,
                lon: entry.lon,
            })
            .collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self.http.get(&url).query(query).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Fetch {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { endpoint, source })
    }
}

fn snapshot_from(parsed: OwCurrentResponse) -> WeatherSnapshot {
    let (condition, description, icon) = primary_weather(&parsed.weather);

    WeatherSnapshot {
        location: Location {
            name: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            state: None,
            lat: parsed.coord.lat,
            lon: parsed.coord.lon,
        },
        observed_at: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        temp_min: parsed.main.temp_min,
        temp_max: parsed.main.temp_max,
        humidity: parsed.main.humidity,
        pressure: parsed.main.pressure,
        visibility_m: parsed.visibility,
        wind: Wind { speed: parsed.wind.speed, degrees: parsed.wind.deg },
        condition,
        description,
        icon,
        sunrise: unix_to_utc(parsed.sys.sunrise).unwrap_or_else(Utc::now),
        sunset: unix_to_utc(parsed.sys.sunset).unwrap_or_else(Utc::now),
    }
}

fn forecast_point(entry: OwForecastEntry) -> ForecastPoint {
    let time = NaiveDateTime::parse_from_str(&entry.dt_txt, FORECAST_TIME_FORMAT)
        .ok()
        .or_else(|| unix_to_utc(entry.dt).map(|dt| dt.naive_utc()))
        .unwrap_or_else(|| Utc::now().naive_utc());

    let (condition, description, icon) = primary_weather(&entry.weather);

    ForecastPoint {
        time,
        temperature: entry.main.temp,
        temp_min: entry.main.temp_min,
        temp_max: entry.main.temp_max,
        condition,
        description,
        icon,
        precipitation_chance: entry.pop.map(|p| p * 100.0),
    }
}

fn primary_weather(weather: &[OwWeather]) -> (Condition, String, String) {
    weather
        .first()
        .map(|w| (w.main, w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| (Condition::Other, "unknown".to_string(), "01d".to_string()))
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: Condition,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
    #[serde(default)]
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: OwCoord,
    weather: Vec<OwWeather>,
    main: OwMain,
    visibility: Option<u32>,
    wind: OwWind,
    dt: i64,
    sys: OwSys,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    pop: Option<f64>,
    dt_txt: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwAirMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwAirEntry {
    main: OwAirMain,
}

#[derive(Debug, Deserialize)]
struct OwAirResponse {
    list: Vec<OwAirEntry>,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: String,
    state: Option<String>,
}
