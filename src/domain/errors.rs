//! Domain Errors
//!
//! Failures that cross the port boundaries.

/// Message shown when the lookup succeeds but the point is not in a city.
pub const NOT_A_CITY_MESSAGE: &str = "That doesn't seem to be a city. Click somewhere else😉";

/// Reverse geocoding failure.
///
/// Never escapes the geocode resolver: it is turned into the text carried by
/// `ResolverStatus::Error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The service answered, but the point does not resolve to a city.
    #[error("That doesn't seem to be a city. Click somewhere else😉")]
    NotACity,
    #[error("reverse geocoding request failed: {0}")]
    Transport(String),
    #[error("reverse geocoding service returned HTTP {0}")]
    Status(u16),
    #[error("malformed reverse geocoding response: {0}")]
    Decode(String),
    /// The lookup was dropped before the service answered.
    #[error("Looking up that place was interrupted. Click the map again")]
    Cancelled,
}

/// City store failure. Propagated to the caller of submit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("city store request failed: {0}")]
    Transport(String),
    #[error("city store returned HTTP {0}")]
    Status(u16),
}
