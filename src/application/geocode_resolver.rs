//! Geocode Resolver - lookup lifecycle
//!
//! Runs one reverse geocoding lookup per selected coordinate and tracks
//! its status. Lookup failures never escape: they become the message held by
//! `ResolverStatus::Error`.

use crate::domain::entities::{PlaceLookupResult, ReverseGeocodeResponse};
use crate::domain::errors::LookupError;
use crate::domain::ports::ReverseGeocoder;
use crate::domain::value_objects::{Coordinate, ResolverStatus};
use parking_lot::Mutex;
use std::sync::Arc;

/// Outcome of a single `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Coordinate incomplete; no request was issued.
    Skipped,
    /// Place found; status is back to Idle.
    Resolved(PlaceLookupResult),
    /// Lookup failed; status holds the same message.
    Failed(String),
    /// A newer lookup started before this one finished; nothing was written.
    Superseded,
}

#[derive(Debug, Default)]
struct ResolverState {
    status: ResolverStatus,
    /// Bumped each time a lookup starts
    generation: u64,
}

/// Resolves coordinates to places through a `ReverseGeocoder`.
pub struct GeocodeResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    state: Mutex<ResolverState>,
}

impl GeocodeResolver {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            geocoder,
            state: Mutex::new(ResolverState::default()),
        }
    }

    /// Current lookup status.
    pub fn status(&self) -> ResolverStatus {
        self.state.lock().status.clone()
    }

    /// Resolve a coordinate to a place.
    pub async fn resolve(&self, coordinate: Coordinate) -> Resolution {
        self.resolve_then(coordinate, |_| {}).await
    }

    /// Resolve a coordinate and hand the service response to `apply`.
    ///
    /// `apply` runs under the resolver lock, in the same critical section
    /// that settles the status, and only if this lookup is still the latest
    /// one. It also sees not-a-city responses, so the previous place never
    /// survives a lookup that answered.
    pub async fn resolve_then<F>(&self, coordinate: Coordinate, apply: F) -> Resolution
    where
        F: FnOnce(&ReverseGeocodeResponse) + Send,
    {
        let Some((latitude, longitude)) = coordinate.pair() else {
            tracing::debug!("coordinate {} incomplete, lookup skipped", coordinate);
            return Resolution::Skipped;
        };

        let generation = self.begin();
        let _guard = LoadingGuard {
            state: &self.state,
            generation,
        };

        tracing::debug!("reverse geocoding {} (lookup #{})", coordinate, generation);

        let response = self.geocoder.reverse_geocode(latitude, longitude).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(
                "lookup #{} for {} superseded by #{}",
                generation,
                coordinate,
                state.generation
            );
            return Resolution::Superseded;
        }

        let outcome = response.and_then(|response| {
            apply(&response);
            PlaceLookupResult::try_from(response)
        });

        match outcome {
            Ok(place) => {
                state.status = ResolverStatus::Idle;
                tracing::debug!(
                    "{} resolved to {}, {}",
                    coordinate,
                    place.city_name,
                    place.country
                );
                Resolution::Resolved(place)
            }
            Err(e) => {
                tracing::warn!("reverse geocoding {} failed: {}", coordinate, e);
                let message = e.to_string();
                state.status = ResolverStatus::Error(message.clone());
                Resolution::Failed(message)
            }
        }
    }

    /// Enter Loading, clearing any previous error.
    fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        state.generation += 1;
        state.status = ResolverStatus::Loading;
        state.generation
    }
}

/// RAII guard for an in-flight lookup.
///
/// If the lookup future is dropped before completing, the status moves to
/// `LookupError::Cancelled` so it never sticks at Loading and the form stays
/// hidden until a new lookup answers.
struct LoadingGuard<'a> {
    state: &'a Mutex<ResolverState>,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if state.generation == self.generation && state.status.is_loading() {
            tracing::debug!("lookup #{} abandoned", self.generation);
            state.status = ResolverStatus::Error(LookupError::Cancelled.to_string());
        }
    }
}
