//! HTTP City Store
//!
//! Implements CityStore against a JSON cities API (`POST /cities`).

use crate::domain::entities::VisitRecord;
use crate::domain::errors::StoreError;
use crate::domain::ports::CityStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// HTTP-backed city store.
///
/// `is_loading` reports whether any create request is still in flight.
pub struct HttpCityStore {
    client: reqwest::Client,
    base_url: String,
    in_flight: AtomicUsize,
}

impl HttpCityStore {
    /// Create a store for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn cities_url(&self) -> String {
        format!("{}/cities", self.base_url)
    }
}

#[async_trait]
impl CityStore for HttpCityStore {
    async fn create_city(&self, record: VisitRecord) -> Result<(), StoreError> {
        let _in_flight = InFlightGuard::enter(&self.in_flight);

        let response = self
            .client
            .post(self.cities_url())
            .json(&record)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("city store rejected {}: {} - {}", record.city_name, status, body);
            return Err(StoreError::Status(status.as_u16()));
        }

        tracing::debug!("city store created {}", record.city_name);
        Ok(())
    }

    fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

/// Counts a request as in flight until dropped.
struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
