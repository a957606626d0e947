//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Offset from an uppercase ASCII letter to its regional indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// A map point selected by the user.
///
/// Either component may be absent while nothing has been selected yet.
/// Serialized as `{ "lat": .., "lng": .. }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "lng")]
    pub longitude: Option<f64>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// A coordinate with neither component present.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Both components, if the coordinate is fully selected.
    pub fn pair(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    pub fn is_selected(&self) -> bool {
        self.pair().is_some()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pair() {
            Some((lat, lng)) => write!(f, "({}, {})", lat, lng),
            None => write!(f, "(unselected)"),
        }
    }
}

/// Lifecycle of the reverse geocoding lookup.
///
/// Transitions are driven only by the lookup itself:
/// Idle/Error -> Loading -> Idle | Error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolverStatus {
    #[default]
    Idle,
    Loading,
    /// Lookup failed; carries the message shown to the user.
    Error(String),
}

impl ResolverStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Derive the flag emoji for an ISO 3166-1 alpha-2 country code.
///
/// Each letter maps to its regional indicator symbol; a pair of them renders
/// as a flag. Input case does not matter.
///
/// # Examples
/// ```
/// use worldwise::domain::value_objects::flag_glyph;
///
/// assert_eq!(flag_glyph("FR"), "\u{1F1EB}\u{1F1F7}");
/// assert_eq!(flag_glyph("us"), flag_glyph("US"));
/// ```
pub fn flag_glyph(country_code: &str) -> String {
    country_code
        .to_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(REGIONAL_INDICATOR_OFFSET + c as u32))
        .collect()
}
