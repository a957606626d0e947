//! BigDataCloud Reverse Geocoder
//!
//! Implements ReverseGeocoder using the BigDataCloud client-side
//! reverse geocoding API.

use crate::domain::entities::ReverseGeocodeResponse;
use crate::domain::errors::LookupError;
use crate::domain::ports::ReverseGeocoder;
use async_trait::async_trait;
use std::time::Duration;

/// BigDataCloud reverse geocoder.
///
/// Issues `GET {endpoint}?latitude=..&longitude=..` and decodes the
/// `city`, `countryName` and `countryCode` fields of the JSON body.
pub struct BigDataCloudGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl BigDataCloudGeocoder {
    /// Create a geocoder for the given endpoint with a request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create a geocoder sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReverseGeocoder for BigDataCloudGeocoder {
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseGeocodeResponse, LookupError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }
}
