//! Render State Service
//!
//! Pure domain logic deciding what the form area shows.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::entities::FormState;
use crate::domain::value_objects::{Coordinate, ResolverStatus};

/// Prompt shown until a point has been picked on the map.
pub const START_PROMPT: &str = "Start by clicking somewhere on the map";

/// Display format of the visit date.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// What the form area should display.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    /// Lookup in flight: spinner, no form.
    Loading,
    /// Lookup failed: message, no form.
    Error { message: String },
    /// No point selected yet.
    Prompt { message: &'static str },
    /// Editable form.
    Form(FormView),
}

/// Pre-filled values of the editable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub city_name: String,
    pub country: String,
    pub flag: String,
    /// Visit date as `dd/mm/yyyy`, empty when no date is set
    pub date: String,
    pub notes: String,
    pub date_label: String,
    pub notes_label: String,
    /// The store is creating a city. Visual only, edits stay enabled.
    pub is_creating: bool,
}

impl FormView {
    fn from_form(form: &FormState, is_creating: bool) -> Self {
        Self {
            city_name: form.city_name.clone(),
            country: form.country.clone(),
            flag: form.flag.clone(),
            date: form
                .date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            notes: form.notes.clone(),
            date_label: format!("When did you go to {}?", form.city_name),
            notes_label: format!("Notes about your trip to {}", form.city_name),
            is_creating,
        }
    }
}

/// Decide the render state.
///
/// Exactly one state applies, checked in order: loading, error,
/// unselected coordinate, form.
pub fn render_state(
    status: &ResolverStatus,
    coordinate: &Coordinate,
    form: &FormState,
    is_creating: bool,
) -> RenderState {
    match status {
        ResolverStatus::Loading => RenderState::Loading,
        ResolverStatus::Error(message) => RenderState::Error {
            message: message.clone(),
        },
        ResolverStatus::Idle if !coordinate.is_selected() => RenderState::Prompt {
            message: START_PROMPT,
        },
        ResolverStatus::Idle => RenderState::Form(FormView::from_form(form, is_creating)),
    }
}
