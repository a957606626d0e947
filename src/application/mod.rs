//! Application Layer
//!
//! Use cases wiring the domain to its ports.

mod form_controller;
mod geocode_resolver;

pub use form_controller::{FormController, SubmitOutcome, CITY_LIST_PATH};
pub use geocode_resolver::{GeocodeResolver, Resolution};
