//! worldwise Library
//!
//! The logic behind the "add a visited city" form: reverse geocoding of a
//! map click, form state and submission to the city list.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{FormController, GeocodeResolver, Resolution, SubmitOutcome, CITY_LIST_PATH};
pub use config::load_config;
pub use domain::entities::{FormState, PlaceLookupResult, ReverseGeocodeResponse, VisitRecord};
pub use domain::errors::{LookupError, StoreError};
pub use domain::ports::{CityStore, Navigator, ReverseGeocoder};
pub use domain::services::{render_state, FormView, RenderState};
pub use domain::value_objects::{flag_glyph, Coordinate, ResolverStatus};
