use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system sent to both providers and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Query parameter value for the daily-forecast provider.
    pub fn temperature_unit(&self) -> &'static str {
        match self {
            Units::Metric => "celsius",
            Units::Imperial => "fahrenheit",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
        }
    }

    pub fn toggled(&self) -> Units {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
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
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Supported UI languages. Besides selecting the provider `lang` parameter,
/// a locale biases ambiguous geocoding results toward its country and picks
/// the default unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
    Es,
    De,
    Fr,
    Ru,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
            Locale::Es => "es",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Ru => "ru",
        }
    }

    pub const fn all() -> &'static [Locale] {
        &[Locale::Tr, Locale::En, Locale::Es, Locale::De, Locale::Fr, Locale::Ru]
    }

    /// Country code that sorts first among ambiguous geocoding candidates.
    pub fn preferred_country(&self) -> &'static str {
        match self {
            Locale::Tr => "TR",
            Locale::En => "US",
            Locale::Es => "ES",
            Locale::De => "DE",
            Locale::Fr => "FR",
            Locale::Ru => "RU",
        }
    }

    /// Imperial for the US locale, metric everywhere else.
    pub fn default_units(&self) -> Units {
        match self {
            Locale::En => Units::Imperial,
            _ => Units::Metric,
        }
    }

    /// BCP-47 tag handed to the speech-to-text capability.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Locale::Tr => "tr-TR",
            Locale::En => "en-US",
            Locale::Es => "es",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Ru => "ru",
        }
    }

    /// Major cities of this locale's country, shown as dashboard tiles.
    pub fn major_cities(&self) -> &'static [&'static str] {
        match self {
            Locale::Tr => &["İstanbul, TR", "Ankara, TR", "İzmir, TR", "Bursa, TR", "Antalya, TR"],
            Locale::En => {
                &["New York, US", "Los Angeles, US", "Chicago, US", "Houston, US", "Phoenix, US"]
            }
            Locale::Es => {
                &["Madrid, ES", "Barcelona, ES", "Valencia, ES", "Sevilla, ES", "Zaragoza, ES"]
            }
            Locale::De => &["Berlin, DE", "Hamburg, DE", "München, DE", "Köln, DE", "Frankfurt, DE"],
            Locale::Fr => &["Paris, FR", "Marseille, FR", "Lyon, FR", "Toulouse, FR", "Nice, FR"],
            Locale::Ru => &[
                "Moscow, RU",
                "Saint Petersburg, RU",
                "Novosibirsk, RU",
                "Yekaterinburg, RU",
                "Kazan, RU",
            ],
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Locale {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "tr" => Ok(Locale::Tr),
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            "de" => Ok(Locale::De),
            "fr" => Ok(Locale::Fr),
            "ru" => Ok(Locale::Ru),
            _ => Err(anyhow::anyhow!(
                "Unknown locale '{value}'. Supported: tr, en, es, de, fr, ru."
            )),
        }
    }
}

/// Fixed footer tiles, independent of the active locale.
pub const WORLD_CAPITALS: &[&str] =
    &["London, GB", "New York, US", "Tokyo, JP", "Paris, FR", "Berlin, DE"];

/// Condition group reported by the primary provider's `weather[0].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Squall,
    Tornado,
    Other,
}

impl Condition {
    pub fn from_name(name: &str) -> Condition {
        match name {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Thunderstorm" => Condition::Thunderstorm,
            "Snow" => Condition::Snow,
            "Mist" => Condition::Mist,
            "Smoke" => Condition::Smoke,
            "Haze" => Condition::Haze,
            "Dust" => Condition::Dust,
            "Fog" => Condition::Fog,
            "Sand" => Condition::Sand,
            "Ash" => Condition::Ash,
            "Squall" => Condition::Squall,
            "Tornado" => Condition::Tornado,
            _ => Condition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Drizzle => "Drizzle",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Snow => "Snow",
            Condition::Mist => "Mist",
            Condition::Smoke => "Smoke",
            Condition::Haze => "Haze",
            Condition::Dust => "Dust",
            Condition::Fog => "Fog",
            Condition::Sand => "Sand",
            Condition::Ash => "Ash",
            Condition::Squall => "Squall",
            Condition::Tornado => "Tornado",
            Condition::Other => "Other",
        }
    }

    /// Rain, drizzle and thunderstorms share the umbrella/raincoat rules.
    pub fn is_rain_family(&self) -> bool {
        matches!(self, Condition::Rain | Condition::Drizzle | Condition::Thunderstorm)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Condition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Condition::from_name(&name))
    }
}

/// A resolved place. Equality (and favorite identity) is name + country;
/// coordinates are carried along for re-fetches but do not participate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Favorite identity, e.g. `"London, GB"`.
    pub fn identity(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.country == other.country
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub degrees: f64,
}

/// Complete current conditions for one resolved location at one point in
/// time. Produced fresh per query and replaced wholesale, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub observed_at: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub visibility_m: Option<u32>,
    pub wind: Wind,
    pub condition: Condition,
    pub description: String,
    pub icon: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// One 3-hour-interval sample from the primary forecast feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: Condition,
    pub description: String,
    pub icon: String,
    /// Probability of precipitation in percent.
    pub precipitation_chance: Option<f64>,
}

/// Chart-ready point: time and temperature only.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature: f64,
}

/// Where a bundle's daily view came from. Exactly one provenance is active
/// per bundle; native and fallback entries are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyProvenance {
    /// Rich 10-day data from the supplemental provider.
    Native,
    /// Reconstructed from 3-hourly samples, capped at 5 entries.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon: String,
    /// Probability of precipitation in percent.
    pub precipitation_chance: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub provenance: DailyProvenance,
    /// Sorted by date ascending, one entry per calendar date.
    pub entries: Vec<DailyEntry>,
}

/// AQI ordinal as reported by the primary provider, 1 (best) to 5 (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQuality {
    pub aqi: u8,
}

/// Lunar data for today, present only when the supplemental feed succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct LunarInfo {
    /// Continuous phase in [0, 1]; 0/1 new moon, 0.5 full moon.
    pub phase: f64,
    pub moonrise: Option<NaiveDateTime>,
    pub moonset: Option<NaiveDateTime>,
}

/// Everything one completed aggregator run produced. Consumers replace the
/// previous bundle atomically; fields from different runs are never paired.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub snapshot: WeatherSnapshot,
    pub hourly: Vec<ForecastPoint>,
    pub air_quality: Option<AirQuality>,
    pub daily: DailyForecast,
    pub lunar: Option<LunarInfo>,
    pub uv_index_max: Option<f64>,
    /// Unit system the bundle was fetched with.
    pub units: Units,
}
