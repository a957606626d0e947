//! Reverse Geocoder Port
//!
//! Defines the interface for resolving a map point to a place.

use crate::domain::entities::ReverseGeocodeResponse;
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Resolver for coordinates to human-readable places.
///
/// This is an outbound port that abstracts the reverse geocoding service.
/// Implementations issue exactly one lookup per call and report transport,
/// HTTP status and decoding failures as `LookupError`. Deciding whether the
/// answer is a city is left to the caller.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Look up the place at the given latitude/longitude.
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseGeocodeResponse, LookupError>;
}
