//! Pure derivations over fetched weather data.
//!
//! Everything here is input → output with no side effects, cheap enough to
//! recompute on every render and safe to cache by snapshot identity.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::model::{Condition, ForecastPoint, HourlyPoint};

/// Air quality band for the provider's 1–5 AQI ordinal. Ordinals 1 and 2
/// both read as "good"; anything unrecognized falls back to the best band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiBand {
    Good,
    Moderate,
    Unhealthy,
    Dangerous,
}

impl AqiBand {
    pub fn label(&self) -> &'static str {
        match self {
            AqiBand::Good => "good",
            AqiBand::Moderate => "moderate",
            AqiBand::Unhealthy => "unhealthy",
            AqiBand::Dangerous => "dangerous",
        }
    }
}

pub fn aqi_band(aqi: u8) -> AqiBand {
    match aqi {
        3 => AqiBand::Moderate,
        4 => AqiBand::Unhealthy,
        5 => AqiBand::Dangerous,
        _ => AqiBand::Good,
    }
}

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// 8-point compass direction for a wind bearing. Negative and >360 degrees
/// wrap into [0, 360).
pub fn wind_compass(degrees: f64) -> &'static str {
    let mut deg = degrees % 360.0;
    if deg < 0.0 {
        deg += 360.0;
    }
    COMPASS[((deg / 45.0).round() as usize) % 8]
}

/// Translates a WMO weather code from the supplemental provider into the
/// primary provider's icon vocabulary.
pub fn icon_for_wmo(code: u16) -> &'static str {
    match code {
        0 => "01d",
        1 => "02d",
        2 => "03d",
        3 => "04d",
        45 | 48 => "50d",
        51 | 53 | 55 | 56 | 57 => "09d",
        61 | 63 | 65 | 66 | 67 => "10d",
        71 | 73 | 75 | 77 => "13d",
        80 | 81 | 82 => "09d",
        85 | 86 => "13d",
        95 | 96 | 99 => "11d",
        _ => "01d",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Running,
    Camping,
    Picnic,
    CarWash,
}

impl Activity {
    pub const fn all() -> &'static [Activity] {
        &[Activity::Running, Activity::Camping, Activity::Picnic, Activity::CarWash]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Activity::Running => "running",
            Activity::Camping => "camping",
            Activity::Picnic => "picnic",
            Activity::CarWash => "car wash",
        }
    }

    /// Whether current conditions suit this activity. All temperature
    /// bounds are exclusive.
    pub fn is_suitable(&self, condition: Condition, temperature: f64) -> bool {
        match self {
            Activity::Running => {
                !matches!(condition, Condition::Rain | Condition::Snow | Condition::Thunderstorm)
                    && temperature > 5.0
                    && temperature < 30.0
            }
            Activity::Camping => {
                matches!(condition, Condition::Clear | Condition::Clouds)
                    && temperature > 15.0
                    && temperature < 35.0
            }
            Activity::Picnic => {
                matches!(condition, Condition::Clear | Condition::Clouds)
                    && temperature > 18.0
                    && temperature < 35.0
            }
            Activity::CarWash => !matches!(
                condition,
                Condition::Rain | Condition::Snow | Condition::Drizzle | Condition::Thunderstorm
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClothingItem {
    LightTop,
    Jacket,
    Coat,
    Shorts,
    WinterHat,
    Umbrella,
    Raincoat,
    Boots,
    Sunglasses,
}

impl ClothingItem {
    pub fn label(&self) -> &'static str {
        match self {
            ClothingItem::LightTop => "light top",
            ClothingItem::Jacket => "jacket",
            ClothingItem::Coat => "coat",
            ClothingItem::Shorts => "shorts",
            ClothingItem::WinterHat => "winter hat",
            ClothingItem::Umbrella => "umbrella",
            ClothingItem::Raincoat => "raincoat",
            ClothingItem::Boots => "boots",
            ClothingItem::Sunglasses => "sunglasses",
        }
    }
}

/// Ordered clothing suggestions. Rules are evaluated top-down and are not
/// mutually exclusive; several may fire for one snapshot.
pub fn clothing_suggestions(
    temperature: f64,
    condition: Condition,
    uv_index: Option<f64>,
) -> Vec<ClothingItem> {
    let mut items = Vec::new();

    if temperature >= 20.0 {
        items.push(ClothingItem::LightTop);
    } else if temperature >= 10.0 {
        items.push(ClothingItem::Jacket);
    } else {
        items.push(ClothingItem::Coat);
    }

    if temperature >= 25.0 {
        items.push(ClothingItem::Shorts);
    }
    if temperature < 5.0 {
        items.push(ClothingItem::WinterHat);
    }

    if condition.is_rain_family() {
        items.push(ClothingItem::Umbrella);
        if temperature < 15.0 {
            items.push(ClothingItem::Raincoat);
            items.push(ClothingItem::Boots);
        }
    }

    if condition == Condition::Snow {
        items.push(ClothingItem::Boots);
    }

    // Suggest sunglasses on clear days even when the UV feed is down.
    if condition == Condition::Clear && uv_index.is_none_or(|uv| uv > 3.0) {
        items.push(ClothingItem::Sunglasses);
    }

    items
}

/// Named moon phase over the continuous [0, 1] cycle. The four cardinal
/// values (0/1, 0.25, 0.5, 0.75) must hit their exact branch; the open
/// intervals in between map to the crescent/gibbous labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub fn label(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "new moon",
            MoonPhase::WaxingCrescent => "waxing crescent",
            MoonPhase::FirstQuarter => "first quarter",
            MoonPhase::WaxingGibbous => "waxing gibbous",
            MoonPhase::FullMoon => "full moon",
            MoonPhase::WaningGibbous => "waning gibbous",
            MoonPhase::LastQuarter => "last quarter",
            MoonPhase::WaningCrescent => "waning crescent",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

#[allow(clippy::float_cmp)]
pub fn moon_phase(phase: f64) -> MoonPhase {
    if phase == 0.0 || phase == 1.0 {
        MoonPhase::NewMoon
    } else if phase == 0.25 {
        MoonPhase::FirstQuarter
    } else if phase == 0.5 {
        MoonPhase::FullMoon
    } else if phase == 0.75 {
        MoonPhase::LastQuarter
    } else if phase < 0.25 {
        MoonPhase::WaxingCrescent
    } else if phase < 0.5 {
        MoonPhase::WaxingGibbous
    } else if phase < 0.75 {
        MoonPhase::WaningGibbous
    } else {
        MoonPhase::WaningCrescent
    }
}

/// Time between sunrise and sunset as whole hours plus remaining minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaylightDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl std::fmt::Display for DaylightDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

pub fn daylight_duration(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> DaylightDuration {
    let seconds = (sunset - sunrise).num_seconds();
    DaylightDuration { hours: seconds / 3600, minutes: (seconds % 3600) / 60 }
}

/// Default chart window: the first 9 samples of the 3-hourly feed (~24 h).
const DEFAULT_CHART_SAMPLES: usize = 9;

/// Chart points from the 3-hourly forecast, optionally narrowed to a single
/// calendar day.
pub fn hourly_points(forecast: &[ForecastPoint], day: Option<NaiveDate>) -> Vec<HourlyPoint> {
    let points = forecast.iter().map(|p| HourlyPoint { time: p.time, temperature: p.temperature });

    match day {
        Some(date) => points.filter(|p| p.time.date() == date).collect(),
        None => points.take(DEFAULT_CHART_SAMPLES).collect(),
    }
}

/// Local noon is the representative sample when reconstructing a daily view
/// from 3-hourly data.
pub(crate) fn is_noon(point: &ForecastPoint) -> bool {
    point.time.hour() == 12 && point.time.minute() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn point(stamp: &str, temperature: f64) -> ForecastPoint {
        ForecastPoint {
            time: NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").expect("valid stamp"),
            temperature,
            temp_min: temperature - 1.0,
            temp_max: temperature + 1.0,
            condition: Condition::Clouds,
            description: "clouds".into(),
            icon: "03d".into(),
            precipitation_chance: None,
        }
    }

    #[test]
    fn aqi_bands() {
        assert_eq!(aqi_band(1), AqiBand::Good);
        assert_eq!(aqi_band(2), AqiBand::Good);
        assert_eq!(aqi_band(1), aqi_band(2));
        assert_eq!(aqi_band(3), AqiBand::Moderate);
        assert_eq!(aqi_band(4), AqiBand::Unhealthy);
        assert_eq!(aqi_band(5), AqiBand::Dangerous);
        assert_eq!(aqi_band(0), AqiBand::Good);
        assert_eq!(aqi_band(99), AqiBand::Good);

        for aqi in 1..=5 {
            assert!(!aqi_band(aqi).label().is_empty());
        }
    }

    #[test]
    fn wind_compass_points() {
        assert_eq!(wind_compass(0.0), "N");
        assert_eq!(wind_compass(45.0), "NE");
        assert_eq!(wind_compass(90.0), "E");
        assert_eq!(wind_compass(135.0), "SE");
        assert_eq!(wind_compass(180.0), "S");
        assert_eq!(wind_compass(225.0), "SW");
        assert_eq!(wind_compass(270.0), "W");
        assert_eq!(wind_compass(315.0), "NW");
        // Rounding midpoints and the wrap back to north.
        assert_eq!(wind_compass(22.0), "N");
        assert_eq!(wind_compass(23.0), "NE");
        assert_eq!(wind_compass(359.0), "N");
    }

    #[test]
    fn wind_compass_wraps_full_turns_and_negatives() {
        for deg in [-720.0, -365.0, -90.0, 0.0, 80.0, 200.0, 359.9] {
            assert_eq!(wind_compass(deg), wind_compass(deg + 360.0));
        }
        assert_eq!(wind_compass(-90.0), "W");
    }

    #[test]
    fn wmo_icon_translation() {
        assert_eq!(icon_for_wmo(0), "01d");
        assert_eq!(icon_for_wmo(3), "04d");
        assert_eq!(icon_for_wmo(45), "50d");
        assert_eq!(icon_for_wmo(55), "09d");
        assert_eq!(icon_for_wmo(67), "10d");
        assert_eq!(icon_for_wmo(77), "13d");
        assert_eq!(icon_for_wmo(82), "09d");
        assert_eq!(icon_for_wmo(86), "13d");
        assert_eq!(icon_for_wmo(99), "11d");
        // Unmapped codes use the explicit default.
        assert_eq!(icon_for_wmo(42), "01d");
    }

    #[test]
    fn running_suitability_bounds_are_exclusive() {
        assert!(Activity::Running.is_suitable(Condition::Clear, 20.0));
        assert!(!Activity::Running.is_suitable(Condition::Clear, 5.0));
        assert!(!Activity::Running.is_suitable(Condition::Clear, 30.0));
        assert!(!Activity::Running.is_suitable(Condition::Rain, 20.0));
        assert!(!Activity::Running.is_suitable(Condition::Thunderstorm, 20.0));
        // Drizzle is not in the running exclusion list.
        assert!(Activity::Running.is_suitable(Condition::Drizzle, 20.0));
    }

    #[test]
    fn camping_and_picnic_need_fair_skies() {
        assert!(Activity::Camping.is_suitable(Condition::Clouds, 16.0));
        assert!(!Activity::Camping.is_suitable(Condition::Clouds, 15.0));
        assert!(!Activity::Camping.is_suitable(Condition::Mist, 20.0));
        assert!(Activity::Picnic.is_suitable(Condition::Clear, 19.0));
        assert!(!Activity::Picnic.is_suitable(Condition::Clear, 18.0));
        assert!(!Activity::Picnic.is_suitable(Condition::Clear, 35.0));
    }

    #[test]
    fn car_wash_only_cares_about_precipitation() {
        assert!(Activity::CarWash.is_suitable(Condition::Clear, -20.0));
        assert!(Activity::CarWash.is_suitable(Condition::Mist, 40.0));
        assert!(!Activity::CarWash.is_suitable(Condition::Drizzle, 20.0));
        assert!(!Activity::CarWash.is_suitable(Condition::Snow, -2.0));
    }

    #[test]
    fn clothing_rules_stack() {
        // Hot clear day: light top, shorts, sunglasses.
        assert_eq!(
            clothing_suggestions(28.0, Condition::Clear, Some(6.0)),
            vec![ClothingItem::LightTop, ClothingItem::Shorts, ClothingItem::Sunglasses]
        );

        // Cold rain: coat, hat, umbrella, raincoat, boots.
        assert_eq!(
            clothing_suggestions(2.0, Condition::Rain, None),
            vec![
                ClothingItem::Coat,
                ClothingItem::WinterHat,
                ClothingItem::Umbrella,
                ClothingItem::Raincoat,
                ClothingItem::Boots,
            ]
        );

        // Mild rain keeps the umbrella but skips the raincoat.
        assert_eq!(
            clothing_suggestions(16.0, Condition::Drizzle, None),
            vec![ClothingItem::Jacket, ClothingItem::Umbrella]
        );

        // Snow adds boots.
        assert_eq!(
            clothing_suggestions(-1.0, Condition::Snow, None),
            vec![ClothingItem::Coat, ClothingItem::WinterHat, ClothingItem::Boots]
        );
    }

    #[test]
    fn sunglasses_depend_on_uv_when_known() {
        // Unknown UV on a clear day still suggests sunglasses.
        assert!(clothing_suggestions(21.0, Condition::Clear, None)
            .contains(&ClothingItem::Sunglasses));
        assert!(clothing_suggestions(21.0, Condition::Clear, Some(4.0))
            .contains(&ClothingItem::Sunglasses));
        assert!(!clothing_suggestions(21.0, Condition::Clear, Some(3.0))
            .contains(&ClothingItem::Sunglasses));
        assert!(!clothing_suggestions(21.0, Condition::Clouds, Some(9.0))
            .contains(&ClothingItem::Sunglasses));
    }

    #[test]
    fn moon_phase_cardinal_values_hit_exact_branches() {
        assert_eq!(moon_phase(0.0), MoonPhase::NewMoon);
        assert_eq!(moon_phase(1.0), MoonPhase::NewMoon);
        assert_eq!(moon_phase(0.25), MoonPhase::FirstQuarter);
        assert_eq!(moon_phase(0.5), MoonPhase::FullMoon);
        assert_eq!(moon_phase(0.75), MoonPhase::LastQuarter);
        // Just below a cardinal point stays in the open interval.
        assert_eq!(moon_phase(0.24999), MoonPhase::WaxingCrescent);
        assert_ne!(moon_phase(0.24999), moon_phase(0.25));
    }

    #[test]
    fn moon_phase_intervals() {
        assert_eq!(moon_phase(0.1), MoonPhase::WaxingCrescent);
        assert_eq!(moon_phase(0.3), MoonPhase::WaxingGibbous);
        assert_eq!(moon_phase(0.6), MoonPhase::WaningGibbous);
        assert_eq!(moon_phase(0.9), MoonPhase::WaningCrescent);
        for phase in [0.0, 0.1, 0.25, 0.4, 0.5, 0.6, 0.75, 0.9, 1.0] {
            assert!(!moon_phase(phase).label().is_empty());
            assert!(!moon_phase(phase).glyph().is_empty());
        }
    }

    #[test]
    fn daylight_duration_formats_hours_and_minutes() {
        let sunrise = DateTime::parse_from_rfc3339("2023-11-15T07:12:00Z")
            .expect("valid time")
            .with_timezone(&Utc);
        let sunset = DateTime::parse_from_rfc3339("2023-11-15T16:56:30Z")
            .expect("valid time")
            .with_timezone(&Utc);

        let daylight = daylight_duration(sunrise, sunset);
        assert_eq!(daylight.hours, 9);
        assert_eq!(daylight.minutes, 44);
        assert_eq!(daylight.to_string(), "9h 44m");
    }

    #[test]
    fn hourly_points_default_window_is_nine_samples() {
        let forecast: Vec<ForecastPoint> = (0..16)
            .map(|i| point(&format!("2023-11-{:02} {:02}:00:00", 15 + i / 8, (i % 8) * 3), 10.0))
            .collect();

        let chart = hourly_points(&forecast, None);
        assert_eq!(chart.len(), 9);
        assert_eq!(chart[0].time, forecast[0].time);
    }

    #[test]
    fn hourly_points_filter_to_one_day() {
        let forecast = vec![
            point("2023-11-15 21:00:00", 9.0),
            point("2023-11-16 00:00:00", 8.0),
            point("2023-11-16 03:00:00", 7.0),
            point("2023-11-17 00:00:00", 6.0),
        ];

        let day = NaiveDate::from_ymd_opt(2023, 11, 16).expect("valid date");
        let chart = hourly_points(&forecast, Some(day));
        assert_eq!(chart.len(), 2);
        assert!(chart.iter().all(|p| p.time.date() == day));
    }
}
