//! Form Controller - Main application use case
//!
//! Owns the visit form: editable fields, the selected coordinate, the
//! lookup that pre-fills the form and the submit that hands the finished
//! record to the city store.

use crate::application::geocode_resolver::{GeocodeResolver, Resolution};
use crate::domain::entities::{FormState, VisitRecord};
use crate::domain::errors::StoreError;
use crate::domain::ports::{CityStore, Navigator, ReverseGeocoder};
use crate::domain::services::{render_state, RenderState};
use crate::domain::value_objects::{Coordinate, ResolverStatus};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Route of the logged cities list, opened after a successful submit.
pub const CITY_LIST_PATH: &str = "/app/cities";

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// City name or date missing; nothing was sent.
    Skipped,
    /// Record created and navigation requested.
    Submitted(VisitRecord),
}

#[derive(Debug, Default)]
struct Session {
    coordinate: Coordinate,
    form: FormState,
}

/// Form controller - main application use case.
///
/// This service orchestrates the form:
/// 1. Re-runs the lookup whenever the selected coordinate changes
/// 2. Pre-fills the form from the lookup result
/// 3. Submits the finished record and navigates to the city list
pub struct FormController {
    resolver: GeocodeResolver,
    store: Arc<dyn CityStore>,
    navigator: Arc<dyn Navigator>,
    session: Mutex<Session>,
}

impl FormController {
    /// Create a new form controller with an empty form dated now.
    pub fn new(
        geocoder: Arc<dyn ReverseGeocoder>,
        store: Arc<dyn CityStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            resolver: GeocodeResolver::new(geocoder),
            store,
            navigator,
            session: Mutex::new(Session::default()),
        }
    }

    /// Select a new coordinate.
    ///
    /// The lookup runs only when the pair differs from the current one;
    /// re-selecting the same point returns `None` without a request.
    /// City name, country and flag of the previous point are dropped before
    /// the lookup starts, so a failed lookup cannot submit the old place.
    pub async fn set_coordinate(&self, coordinate: Coordinate) -> Option<Resolution> {
        {
            let mut session = self.session.lock();
            if session.coordinate == coordinate {
                return None;
            }
            session.coordinate = coordinate;
            session.form.clear_place();
        }

        let resolution = self
            .resolver
            .resolve_then(coordinate, |response| {
                self.session.lock().form.apply_response(response);
            })
            .await;

        Some(resolution)
    }

    pub fn set_city_name(&self, city_name: impl Into<String>) {
        self.session.lock().form.city_name = city_name.into();
    }

    pub fn set_country(&self, country: impl Into<String>) {
        self.session.lock().form.country = country.into();
    }

    pub fn set_date(&self, date: Option<DateTime<Utc>>) {
        self.session.lock().form.date = date;
    }

    pub fn set_notes(&self, notes: impl Into<String>) {
        self.session.lock().form.notes = notes.into();
    }

    /// Snapshot of the form fields.
    pub fn form(&self) -> FormState {
        self.session.lock().form.clone()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.session.lock().coordinate
    }

    pub fn status(&self) -> ResolverStatus {
        self.resolver.status()
    }

    /// Decide what the form area shows right now.
    pub fn render(&self) -> RenderState {
        let status = self.resolver.status();
        let is_creating = self.store.is_loading();
        let session = self.session.lock();
        render_state(&status, &session.coordinate, &session.form, is_creating)
    }

    /// Submit the form.
    ///
    /// Does nothing while the city name is empty or the date is unset.
    /// Store failures are returned as-is and skip navigation.
    pub async fn submit(&self) -> Result<SubmitOutcome, StoreError> {
        let record = {
            let session = self.session.lock();
            session.form.to_record(session.coordinate)
        };

        let Some(record) = record else {
            tracing::debug!("submit ignored: city name or date missing");
            return Ok(SubmitOutcome::Skipped);
        };

        self.store.create_city(record.clone()).await?;
        tracing::info!(
            "logged visit to {}, {} at {}",
            record.city_name,
            record.country,
            record.position
        );

        self.navigator.navigate_to(CITY_LIST_PATH);
        Ok(SubmitOutcome::Submitted(record))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::ReverseGeocodeResponse;
    use crate::domain::errors::{LookupError, NOT_A_CITY_MESSAGE};
    use crate::domain::services::START_PROMPT;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tracing_test::traced_test;

    // ===== Mock Implementations =====

    struct MockGeocoder {
        responses: Mutex<Vec<Result<ReverseGeocodeResponse, LookupError>>>,
        calls: AtomicUsize,
    }

    impl MockGeocoder {
        /// Answers with `responses` in order, repeating the last one.
        fn new(responses: Vec<Result<ReverseGeocodeResponse, LookupError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReverseGeocoder for MockGeocoder {
        async fn reverse_geocode(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<ReverseGeocodeResponse, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock();
            if responses.len() > 1 {
                responses.remove(0)
            } else {
                responses[0].clone()
            }
        }
    }

    struct MockStore {
        created: Mutex<Vec<VisitRecord>>,
        fail: bool,
        loading: AtomicBool,
    }

    impl MockStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                created: Mutex::new(Vec::new()),
                fail: false,
                loading: AtomicBool::new(false),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                created: Mutex::new(Vec::new()),
                fail: true,
                loading: AtomicBool::new(false),
            })
        }

        fn created(&self) -> Vec<VisitRecord> {
            self.created.lock().clone()
        }
    }

    #[async_trait]
    impl CityStore for MockStore {
        async fn create_city(&self, record: VisitRecord) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Status(500));
            }
            self.created.lock().push(record);
            Ok(())
        }

        fn is_loading(&self) -> bool {
            self.loading.load(Ordering::SeqCst)
        }
    }

    struct MockNavigator {
        paths: Mutex<Vec<String>>,
    }

    impl MockNavigator {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                paths: Mutex::new(Vec::new()),
            })
        }

        fn paths(&self) -> Vec<String> {
            self.paths.lock().clone()
        }
    }

    impl Navigator for MockNavigator {
        fn navigate_to(&self, path: &str) {
            self.paths.lock().push(path.to_string());
        }
    }

    fn paris() -> Result<ReverseGeocodeResponse, LookupError> {
        Ok(ReverseGeocodeResponse {
            city: Some("Paris".to_string()),
            country_name: Some("France".to_string()),
            country_code: Some("FR".to_string()),
        })
    }

    /// Never answers for latitude 0.0; Paris everywhere else.
    struct HangingGeocoder;

    #[async_trait]
    impl ReverseGeocoder for HangingGeocoder {
        async fn reverse_geocode(
            &self,
            latitude: f64,
            _longitude: f64,
        ) -> Result<ReverseGeocodeResponse, LookupError> {
            if latitude == 0.0 {
                return std::future::pending().await;
            }
            paris()
        }
    }

    fn ocean() -> Result<ReverseGeocodeResponse, LookupError> {
        Ok(ReverseGeocodeResponse {
            city: None,
            country_name: None,
            country_code: None,
        })
    }

    struct Fixture {
        controller: FormController,
        geocoder: Arc<MockGeocoder>,
        store: Arc<MockStore>,
        navigator: Arc<MockNavigator>,
    }

    fn fixture(responses: Vec<Result<ReverseGeocodeResponse, LookupError>>) -> Fixture {
        fixture_with_store(responses, MockStore::new())
    }

    fn fixture_with_store(
        responses: Vec<Result<ReverseGeocodeResponse, LookupError>>,
        store: Arc<MockStore>,
    ) -> Fixture {
        let geocoder = MockGeocoder::new(responses);
        let navigator = MockNavigator::new();
        let controller = FormController::new(geocoder.clone(), store.clone(), navigator.clone());
        Fixture {
            controller,
            geocoder,
            store,
            navigator,
        }
    }

    // ===== Coordinate changes =====

    #[tokio::test]
    async fn test_coordinate_change_prefills_form() {
        let f = fixture(vec![paris()]);

        let resolution = f
            .controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;

        assert!(matches!(resolution, Some(Resolution::Resolved(_))));
        let form = f.controller.form();
        assert_eq!(form.city_name, "Paris");
        assert_eq!(form.country, "France");
        assert_eq!(form.flag, "🇫🇷");
        assert_eq!(f.controller.status(), ResolverStatus::Idle);
    }

    #[tokio::test]
    async fn test_same_coordinate_does_not_refetch() {
        let f = fixture(vec![paris()]);
        let coord = Coordinate::new(48.8566, 2.3522);

        f.controller.set_coordinate(coord).await;
        let again = f.controller.set_coordinate(coord).await;

        assert!(again.is_none());
        assert_eq!(f.geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_field_edits_do_not_refetch() {
        let f = fixture(vec![paris()]);
        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;

        f.controller.set_notes("Nice trip");
        f.controller.set_date(None);
        f.controller.set_city_name("Paname");
        f.controller.set_country("République française");

        assert_eq!(f.geocoder.calls(), 1);
        let form = f.controller.form();
        assert_eq!(form.city_name, "Paname");
        assert_eq!(form.country, "République française");
        assert_eq!(form.notes, "Nice trip");
        assert!(form.date.is_none());
    }

    #[tokio::test]
    async fn test_new_coordinate_refetches_and_overwrites() {
        let tokyo = Ok(ReverseGeocodeResponse {
            city: Some("Tokyo".to_string()),
            country_name: Some("Japan".to_string()),
            country_code: Some("JP".to_string()),
        });
        let f = fixture(vec![paris(), tokyo]);

        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;
        f.controller.set_city_name("edited");
        f.controller
            .set_coordinate(Coordinate::new(35.6762, 139.6503))
            .await;

        assert_eq!(f.geocoder.calls(), 2);
        let form = f.controller.form();
        assert_eq!(form.city_name, "Tokyo");
        assert_eq!(form.flag, "🇯🇵");
    }

    #[tokio::test]
    async fn test_not_a_city_after_city_cannot_submit_old_place() {
        let atlantic = Ok(ReverseGeocodeResponse {
            city: Some(String::new()),
            country_name: Some("Atlantic".to_string()),
            country_code: Some("AO".to_string()),
        });
        let f = fixture(vec![paris(), atlantic]);

        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;
        f.controller.set_coordinate(Coordinate::new(0.0, -30.0)).await;

        assert_eq!(
            f.controller.status(),
            ResolverStatus::Error(NOT_A_CITY_MESSAGE.to_string())
        );
        let form = f.controller.form();
        assert!(form.city_name.is_empty());
        assert_eq!(form.country, "Atlantic");
        assert_eq!(form.flag, "🇦🇴");

        let outcome = f.controller.submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Skipped);
        assert!(f.store.created().is_empty());
        assert!(f.navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn test_failed_lookup_after_city_cannot_submit_old_place() {
        let f = fixture(vec![paris(), Err(LookupError::Status(503))]);

        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;
        f.controller.set_coordinate(Coordinate::new(10.0, 10.0)).await;

        assert!(f.controller.form().city_name.is_empty());
        assert_eq!(f.controller.submit().await.unwrap(), SubmitOutcome::Skipped);
        assert!(f.store.created().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_lookup_hides_form_and_blocks_submit() {
        let store = MockStore::new();
        let navigator = MockNavigator::new();
        let controller =
            FormController::new(Arc::new(HangingGeocoder), store.clone(), navigator.clone());

        controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            controller.set_coordinate(Coordinate::new(0.0, -30.0)),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            controller.render(),
            RenderState::Error {
                message: LookupError::Cancelled.to_string()
            }
        );
        assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Skipped);
        assert!(store.created().is_empty());
        assert!(navigator.paths().is_empty());
    }

    // ===== Rendering =====

    #[tokio::test]
    async fn test_render_prompt_before_selection() {
        let f = fixture(vec![paris()]);
        assert_eq!(
            f.controller.render(),
            RenderState::Prompt {
                message: START_PROMPT
            }
        );
    }

    #[tokio::test]
    async fn test_render_error_after_not_a_city() {
        let f = fixture(vec![ocean()]);
        f.controller.set_coordinate(Coordinate::new(0.0, -30.0)).await;

        assert_eq!(
            f.controller.render(),
            RenderState::Error {
                message: NOT_A_CITY_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_render_form_shows_creating_state() {
        let f = fixture(vec![paris()]);
        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;
        f.store.loading.store(true, Ordering::SeqCst);

        let RenderState::Form(view) = f.controller.render() else {
            panic!("expected form");
        };
        assert!(view.is_creating);
        assert_eq!(view.city_name, "Paris");

        // creating does not block edits
        f.controller.set_notes("still typing");
        assert_eq!(f.controller.form().notes, "still typing");
    }

    // ===== Submit =====

    #[tokio::test]
    async fn test_submit_with_empty_city_is_noop() {
        let f = fixture(vec![paris()]);

        let outcome = f.controller.submit().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Skipped);
        assert!(f.store.created().is_empty());
        assert!(f.navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_date_is_noop() {
        let f = fixture(vec![paris()]);
        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;
        f.controller.set_date(None);

        let outcome = f.controller.submit().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Skipped);
        assert!(f.store.created().is_empty());
        assert!(f.navigator.paths().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_submit_creates_record_and_navigates() {
        let f = fixture(vec![paris()]);
        let coord = Coordinate::new(48.8566, 2.3522);
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        f.controller.set_coordinate(coord).await;
        f.controller.set_date(Some(date));
        f.controller.set_notes("Nice trip");

        let outcome = f.controller.submit().await.unwrap();

        let created = f.store.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].city_name, "Paris");
        assert_eq!(created[0].country, "France");
        assert_eq!(created[0].emoji, "🇫🇷");
        assert_eq!(created[0].notes, "Nice trip");
        assert_eq!(created[0].date, date);
        assert_eq!(created[0].position, coord);
        assert_eq!(outcome, SubmitOutcome::Submitted(created[0].clone()));
        assert_eq!(f.navigator.paths(), vec![CITY_LIST_PATH.to_string()]);
        assert!(logs_contain("logged visit to Paris, France"));
    }

    #[tokio::test]
    async fn test_submit_store_failure_propagates_without_navigation() {
        let f = fixture_with_store(vec![paris()], MockStore::failing());
        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;

        let result = f.controller.submit().await;

        assert_eq!(result, Err(StoreError::Status(500)));
        assert!(f.navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_submit_is_not_debounced() {
        let f = fixture(vec![paris()]);
        f.controller
            .set_coordinate(Coordinate::new(48.8566, 2.3522))
            .await;

        let (a, b) = futures::future::join(f.controller.submit(), f.controller.submit()).await;

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(f.store.created().len(), 2);
        assert_eq!(f.navigator.paths().len(), 2);
    }

    #[test]
    fn test_controller_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FormController>();
    }
}
