//! City Store Port
//!
//! Defines the interface for the list of logged cities.

use crate::domain::entities::VisitRecord;
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Store that receives newly logged city visits.
///
/// The form only creates records; listing, deleting and caching belong to
/// whatever sits behind this port.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Create a city entry from a submitted visit.
    async fn create_city(&self, record: VisitRecord) -> Result<(), StoreError>;

    /// Whether a store request is currently in flight.
    fn is_loading(&self) -> bool;
}
