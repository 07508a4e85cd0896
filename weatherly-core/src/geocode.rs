//! Free-text and coordinate resolution into canonical locations.

use crate::error::WeatherError;
use crate::model::{Locale, Location};
use crate::provider::openweather::OpenWeatherClient;

/// Turns a typed query into ranked location candidates, biased toward the
/// active locale's country. Coordinates (map click, geolocation) skip the
/// search entirely.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    client: OpenWeatherClient,
}

impl GeoResolver {
    pub fn new(client: OpenWeatherClient) -> Self {
        Self { client }
    }

    /// Up to 5 candidates, those matching the locale's preferred country
    /// first. Fails with `CityNotFound` when the geocoder has nothing.
    pub async fn resolve(
        &self,
        query: &str,
        preference: Locale,
    ) -> Result<Vec<Location>, WeatherError> {
        let mut candidates = self.client.geocode(query).await?;

        if candidates.is_empty() {
            return Err(WeatherError::CityNotFound { query: query.to_owned() });
        }

        prefer_country(&mut candidates, preference.preferred_country());
        Ok(candidates)
    }

    /// Coordinate echo for map clicks and geolocation. The display name is
    /// supplied by the caller ("My Location"), never reverse-geocoded.
    pub fn located(lat: f64, lon: f64, display_name: &str) -> Location {
        Location { name: display_name.to_owned(), country: String::new(), state: None, lat, lon }
    }
}

/// Stable partition: candidates from `country` move to the front, relative
/// order within each partition is preserved (provider order reflects
/// population).
fn prefer_country(candidates: &mut [Location], country: &str) {
    candidates.sort_by_key(|candidate| candidate.country != country);
}
