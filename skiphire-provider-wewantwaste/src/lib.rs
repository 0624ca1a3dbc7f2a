//! Catalog provider for the We Want Waste skip hire API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use skiphire_core::{
    model::{LocationQuery, Offering, OfferingId},
    ports::{CatalogError, CatalogPort},
};

/// Production API root.
pub const BASE_URL: &str = "https://app.wewantwaste.co.uk/api";

/// Upper bound on one catalog request, from connect to the last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Single skip as returned by /skips/by-location
#[derive(Debug, Deserialize)]
struct SkipRecord {
    id: u64,
    size: u32,
    hire_period_days: u32,
    transport_cost: Option<Decimal>,
    per_tonne_cost: Option<Decimal>,
    price_before_vat: Decimal,
    vat: Decimal,
    #[serde(default)]
    postcode: String,
    #[serde(default)]
    area: String,
    forbidden: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    allowed_on_road: bool,
    allows_heavy_waste: bool,
}

impl From<SkipRecord> for Offering {
    fn from(record: SkipRecord) -> Self {
        Offering {
            id: OfferingId(record.id),
            size: record.size,
            price_before_tax: record.price_before_vat,
            tax_rate_percent: record.vat,
            hire_period_days: record.hire_period_days,
            allowed_on_road: record.allowed_on_road,
            allows_heavy_waste: record.allows_heavy_waste,
            area: record.area,
            postcode: record.postcode,
            forbidden: record.forbidden,
            per_tonne_cost: record.per_tonne_cost,
            transport_cost: record.transport_cost,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Skip catalog backed by the We Want Waste REST API.
pub struct WeWantWasteCatalog {
    client: Client,
    base_url: String,
}

impl WeWantWasteCatalog {
    /// Create a catalog talking to the production API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a catalog talking to an alternative API root, e.g. a staging host.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(client: Client, base_url: S) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl CatalogPort for WeWantWasteCatalog {
    async fn fetch(&self, query: &LocationQuery) -> Result<Vec<Offering>, CatalogError> {
        let url = format!("{}/skips/by-location", self.base_url);
        info!(url = %url, postcode = %query.postcode, area = %query.area, "requesting skips");

        let req = self.client.get(url).query(&[
            ("postcode", query.postcode.as_str()),
            ("area", query.area.as_str()),
        ]);

        let records = fetch_json::<Vec<SkipRecord>>(req).await?;
        debug!(count = records.len(), "received skip records");

        Ok(records.into_iter().map(Offering::from).collect())
    }
}

/// Build an HTTP client for the catalog API.
///
/// A request that outlives `timeout` fails with [`CatalogError::Network`].
///
/// # Errors
///
/// Returns the builder error when the TLS backend cannot be initialised.
pub fn http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

/// Build a shareable catalog port bound to the given HTTP client.
#[must_use]
pub fn catalog(client: Client, base_url: Option<&str>) -> Arc<dyn CatalogPort> {
    let catalog = match base_url {
        Some(url) => WeWantWasteCatalog::with_base_url(client, url),
        None => WeWantWasteCatalog::new(client),
    };
    Arc::new(catalog)
}

// Send a request and decode its JSON body, keeping status and parse failures apart.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, CatalogError> {
    let resp = req.send().await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(CatalogError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
