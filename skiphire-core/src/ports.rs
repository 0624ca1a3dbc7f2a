//! Traits describing the catalog and booking collaborators.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{EnrichedOffering, LocationQuery, Offering};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the catalog service.
pub enum CatalogError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The service answered with a non-success status.
    #[error("Catalog service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] JsonError),
}

#[async_trait]
/// Trait for catalog service backends.
pub trait CatalogPort: Send + Sync {
    /// Fetch the offerings for a location, in response order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the request fails or the body cannot be parsed.
    async fn fetch(&self, query: &LocationQuery) -> Result<Vec<Offering>, CatalogError>;
}

/// Collaborator receiving a confirmed selection, e.g. a checkout flow.
pub trait BookingPort {
    /// Called with the selected offering when the user confirms it.
    fn confirm(&mut self, offering: &EnrichedOffering);
}
