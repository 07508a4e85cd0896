//! Search-as-you-type suggestions with stale-response discard.
//!
//! Each keystroke begins a new generation; a suggestion response is applied
//! only if its generation is still the latest when it arrives. This makes
//! the policy last-issued-wins rather than last-arrived-wins: a slow
//! response for an outdated query can never overwrite newer results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::WeatherError;
use crate::geocode::GeoResolver;
use crate::model::{Locale, Location};

/// Pause after the last keystroke before a suggestion fetch is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Opaque query generation number handed out by [`SuggestionTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Default)]
pub struct SuggestionTracker {
    current: AtomicU64,
}

impl SuggestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new query generation, superseding all earlier ones.
    pub fn begin(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.load(Ordering::SeqCst) == generation.0
    }
}

/// Autocomplete front door: resolves candidates for the latest query text
/// and drops results that were superseded mid-flight.
#[derive(Debug)]
pub struct SuggestionService {
    resolver: GeoResolver,
    tracker: SuggestionTracker,
}

impl SuggestionService {
    pub fn new(resolver: GeoResolver) -> Self {
        Self { resolver, tracker: SuggestionTracker::new() }
    }

    /// Call on every keystroke, before the debounce timer.
    pub fn begin(&self) -> Generation {
        self.tracker.begin()
    }

    /// Fetches suggestions for one generation's query text.
    ///
    /// Returns `None` when the generation was superseded while the request
    /// was in flight — the caller must discard the response. Lookup errors
    /// degrade to an empty list; suggestions are never worth surfacing an
    /// error for.
    pub async fn fetch(
        &self,
        generation: Generation,
        query: &str,
        locale: Locale,
    ) -> Option<Vec<Location>> {
        let candidates = if query.is_empty() {
            Vec::new()
        } else {
            match self.resolver.resolve(query, locale).await {
                Ok(candidates) => candidates,
                Err(WeatherError::CityNotFound { .. }) => Vec::new(),
                Err(err) => {
                    tracing::debug!("suggestion lookup failed: {err}");
                    Vec::new()
                }
            }
        };

        self.tracker.is_current(generation).then_some(candidates)
    }
}
