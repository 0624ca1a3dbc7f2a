//! Fixtures shared by the renderer tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal_macros::dec;
use skiphire_core::{
    model::{LocationQuery, Offering, OfferingId},
    ports::{CatalogError, CatalogPort},
    service::SkipSelectionService,
};

use crate::app::App;

struct StaticCatalog(Vec<Offering>);

#[async_trait]
impl CatalogPort for StaticCatalog {
    async fn fetch(&self, _query: &LocationQuery) -> Result<Vec<Offering>, CatalogError> {
        Ok(self.0.clone())
    }
}

struct OfflineCatalog;

#[async_trait]
impl CatalogPort for OfflineCatalog {
    async fn fetch(&self, _query: &LocationQuery) -> Result<Vec<Offering>, CatalogError> {
        Err(CatalogError::Status {
            status: 500,
            body: String::new(),
        })
    }
}

pub(crate) fn skip(id: u64, size: u32, forbidden: bool) -> Offering {
    Offering {
        id: OfferingId(id),
        size,
        price_before_tax: dec!(200),
        tax_rate_percent: dec!(20),
        hire_period_days: 14,
        allowed_on_road: true,
        allows_heavy_waste: false,
        area: "Lowestoft".to_owned(),
        postcode: "NR32".to_owned(),
        forbidden,
        per_tonne_cost: None,
        transport_cost: Some(dec!(30)),
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}

pub(crate) fn unloaded_app() -> App {
    let service = SkipSelectionService::new(Arc::new(OfflineCatalog), LocationQuery::default());
    App::new(service)
}

pub(crate) async fn failed_app() -> App {
    let mut app = unloaded_app();
    app.service.load().await;
    app
}

pub(crate) async fn loaded_app(offerings: Vec<Offering>) -> App {
    let service = SkipSelectionService::new(
        Arc::new(StaticCatalog(offerings)),
        LocationQuery::default(),
    );
    let mut app = App::new(service);
    app.service.load().await;
    app
}
