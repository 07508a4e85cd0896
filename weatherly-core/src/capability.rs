//! Seams for device capabilities the core does not implement itself.
//!
//! Speech recognition and geolocation are platform features; the core only
//! defines what it needs from them and how their failures degrade.

use async_trait::async_trait;

use crate::error::WeatherError;
use crate::model::Locale;

/// Searched when geolocation is denied or unsupported.
pub const DEFAULT_LOCATION_QUERY: &str = "Istanbul, TR";

/// Speech-to-text capability. Implementations listen once and return a
/// single transcript, or `CapabilityUnavailable` when no engine exists.
#[async_trait]
pub trait SpeechCapture: Send + Sync {
    async fn listen(&self, locale_tag: &str) -> Result<String, WeatherError>;
}

/// Device position capability. Returns a `(lat, lon)` pair, or
/// `CapabilityUnavailable` on permission or platform failure.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn current_position(&self) -> Result<(f64, f64), WeatherError>;
}

/// Some engines punctuate transcripts ("London." / "Paris, France"); strip
/// that before using the text as a search query.
pub fn clean_transcript(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '.' | ',')).collect::<String>().trim().to_string()
}

/// Listens with the locale's speech tag and returns search-ready text.
pub async fn spoken_query(
    speech: &dyn SpeechCapture,
    locale: Locale,
) -> Result<String, WeatherError> {
    let transcript = speech.listen(locale.speech_tag()).await?;
    Ok(clean_transcript(&transcript))
}

/// Where a fresh session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartLocation {
    /// Device position; display it under the injected "my location" name.
    Coordinates { lat: f64, lon: f64 },
    /// Geolocation unavailable: search this fixed query instead.
    DefaultQuery(&'static str),
}

pub async fn startup_location(locator: &dyn GeoLocator) -> StartLocation {
    match locator.current_position().await {
        Ok((lat, lon)) => StartLocation::Coordinates { lat, lon },
        Err(err) => {
            tracing::info!("geolocation unavailable, using default city: {err}");
            StartLocation::DefaultQuery(DEFAULT_LOCATION_QUERY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedSpeech(&'static str);

    #[async_trait]
    impl SpeechCapture for CannedSpeech {
        async fn listen(&self, _locale_tag: &str) -> Result<String, WeatherError> {
            Ok(self.0.to_string())
        }
    }

    struct NoSpeech;

    #[async_trait]
    impl SpeechCapture for NoSpeech {
        async fn listen(&self, _locale_tag: &str) -> Result<String, WeatherError> {
            Err(WeatherError::CapabilityUnavailable { capability: "speech recognition" })
        }
    }

    struct FixedPosition(f64, f64);

    #[async_trait]
    impl GeoLocator for FixedPosition {
        async fn current_position(&self) -> Result<(f64, f64), WeatherError> {
            Ok((self.0, self.1))
        }
    }

    struct NoLocation;

    #[async_trait]
    impl GeoLocator for NoLocation {
        async fn current_position(&self) -> Result<(f64, f64), WeatherError> {
            Err(WeatherError::CapabilityUnavailable { capability: "geolocation" })
        }
    }

    #[test]
    fn clean_transcript_strips_punctuation_and_whitespace() {
        assert_eq!(clean_transcript("London."), "London");
        assert_eq!(clean_transcript("Paris, France"), "Paris France");
        assert_eq!(clean_transcript("  Berlin  "), "Berlin");
    }

    #[tokio::test]
    async fn spoken_query_cleans_the_transcript() {
        let query = spoken_query(&CannedSpeech("New York."), Locale::En).await.expect("transcript");
        assert_eq!(query, "New York");
    }

    #[tokio::test]
    async fn spoken_query_propagates_missing_capability() {
        let err = spoken_query(&NoSpeech, Locale::En).await.unwrap_err();
        assert!(matches!(err, WeatherError::CapabilityUnavailable { .. }));
    }

    #[tokio::test]
    async fn startup_location_uses_device_position_when_available() {
        let start = startup_location(&FixedPosition(41.0, 29.0)).await;
        assert_eq!(start, StartLocation::Coordinates { lat: 41.0, lon: 29.0 });
    }

    #[tokio::test]
    async fn startup_location_falls_back_to_default_city() {
        let start = startup_location(&NoLocation).await;
        assert_eq!(start, StartLocation::DefaultQuery("Istanbul, TR"));
    }
}
