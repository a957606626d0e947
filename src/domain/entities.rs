//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the visit form.
//! They have no I/O and contain only business logic.

use crate::domain::errors::LookupError;
use crate::domain::value_objects::{flag_glyph, Coordinate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by the reverse geocoding service.
///
/// Only the fields the form needs are decoded; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// A place successfully resolved from a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceLookupResult {
    pub city_name: String,
    pub country: String,
    /// ISO 3166-1 alpha-2 code as returned by the service
    pub country_code: String,
    /// Flag emoji derived from `country_code`
    pub flag: String,
}

impl TryFrom<ReverseGeocodeResponse> for PlaceLookupResult {
    type Error = LookupError;

    /// An absent or empty `city` means the point is not inside a city.
    fn try_from(response: ReverseGeocodeResponse) -> Result<Self, Self::Error> {
        let city_name = response
            .city
            .filter(|c| !c.is_empty())
            .ok_or(LookupError::NotACity)?;
        let country_code = response.country_code.unwrap_or_default();

        Ok(Self {
            city_name,
            country: response.country_name.unwrap_or_default(),
            flag: flag_glyph(&country_code),
            country_code,
        })
    }
}

/// Editable fields of the visit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub city_name: String,
    pub country: String,
    /// Cleared when the date picker is emptied
    pub date: Option<DateTime<Utc>>,
    pub notes: String,
    pub flag: String,
}

impl FormState {
    /// Empty form with the visit date set to now.
    pub fn new() -> Self {
        Self::with_date(Some(Utc::now()))
    }

    pub fn with_date(date: Option<DateTime<Utc>>) -> Self {
        Self {
            city_name: String::new(),
            country: String::new(),
            date,
            notes: String::new(),
            flag: String::new(),
        }
    }

    /// Overwrite the resolver-owned fields with a lookup response.
    ///
    /// Applied even when the point is not in a city, which leaves the city
    /// name empty. Date and notes are left alone.
    pub fn apply_response(&mut self, response: &ReverseGeocodeResponse) {
        self.city_name = response.city.clone().unwrap_or_default();
        self.country = response.country_name.clone().unwrap_or_default();
        self.flag = flag_glyph(response.country_code.as_deref().unwrap_or_default());
    }

    /// Forget the place resolved for a previous coordinate.
    pub fn clear_place(&mut self) {
        self.city_name.clear();
        self.country.clear();
        self.flag.clear();
    }

    /// Build the record to submit, or None while city name or date is missing.
    pub fn to_record(&self, position: Coordinate) -> Option<VisitRecord> {
        if self.city_name.is_empty() {
            return None;
        }
        let date = self.date?;

        Some(VisitRecord {
            city_name: self.city_name.clone(),
            country: self.country.clone(),
            emoji: self.flag.clone(),
            date,
            notes: self.notes.clone(),
            position,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// A logged city visit, as handed to the city store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub city_name: String,
    pub country: String,
    /// Flag glyph of the country
    pub emoji: String,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub position: Coordinate,
}
