use thiserror::Error;

/// Errors surfaced by the aggregation core.
///
/// Failures of the supplemental daily-forecast provider are deliberately NOT
/// represented here: that dependency is soft, its client returns `Option`
/// and logs, so callers cannot mistake a degraded daily view for a failed
/// query.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// A primary provider call returned a non-success status. Fatal to the
    /// whole query; no partial snapshot is exposed.
    #[error("{endpoint} request failed with status {status}: {body}")]
    Fetch { endpoint: &'static str, status: u16, body: String },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("failed to reach weather service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a payload we could not decode.
    #[error("failed to parse {endpoint} response: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The geocoder returned zero candidates for the query.
    #[error("city not found: {query}")]
    CityNotFound { query: String },

    /// Speech input or geolocation is not available on this system.
    #[error("{capability} is not available")]
    CapabilityUnavailable { capability: &'static str },
}

impl WeatherError {
    /// Whether this error came from a primary provider fetch, as opposed to
    /// user input (unknown city) or a missing device capability.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            WeatherError::Fetch { .. } | WeatherError::Transport(_) | WeatherError::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_are_classified() {
        let err = WeatherError::Fetch { endpoint: "current weather", status: 502, body: "bad gateway".into() };
        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("502"));

        let err = WeatherError::CityNotFound { query: "Atlantis".into() };
        assert!(!err.is_fetch_failure());
        assert!(err.to_string().contains("Atlantis"));

        let err = WeatherError::CapabilityUnavailable { capability: "geolocation" };
        assert!(!err.is_fetch_failure());
    }
}
