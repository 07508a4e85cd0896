//! Network adapters for the two weather providers.
//!
//! Each client is a pure fetch adapter: it owns its HTTP connection, knows
//! its endpoints, and converts provider-native JSON into domain types.
//! No state is shared between clients.

use chrono::{DateTime, Utc};

pub mod openmeteo;
pub mod openweather;

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_to_utc_converts() {
        let dt = unix_to_utc(0).expect("epoch is valid");
        assert_eq!(dt.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn truncate_body_keeps_short_and_cuts_long() {
        assert_eq!(truncate_body("short"), "short");

        let long = "x".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);

        // Multi-byte input must not split a character.
        let turkish = "ğ".repeat(300);
        assert!(truncate_body(&turkish).ends_with("..."));
    }
}
