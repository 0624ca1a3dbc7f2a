//! End-to-end selection flow against an in-memory catalog.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use skiphire_core::{
    BookingPort, CatalogError, CatalogPort, EnrichedOffering, LoadStatus, LocationQuery,
    Offering, OfferingId, SkipSelectionService, ViewEvent,
};

/// Serves scripted responses in order, one per fetch.
struct ScriptedCatalog {
    responses: Mutex<VecDeque<Result<Vec<Offering>, u16>>>,
    queries: Mutex<Vec<LocationQuery>>,
}

impl ScriptedCatalog {
    fn new(responses: Vec<Result<Vec<Offering>, u16>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CatalogPort for ScriptedCatalog {
    async fn fetch(&self, query: &LocationQuery) -> Result<Vec<Offering>, CatalogError> {
        self.queries.lock().expect("queries lock").push(query.clone());
        let next = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or(Err(503));
        next.map_err(|status| CatalogError::Status {
            status,
            body: String::new(),
        })
    }
}

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 3)
        .and_then(|date| date.and_hms_opt(13, 51, 46))
        .expect("valid timestamp")
}

fn skip(id: u64, size: u32, forbidden: bool) -> Offering {
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
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn three_skips() -> Vec<Offering> {
    vec![skip(1, 4, false), skip(2, 6, false), skip(3, 8, false)]
}

#[derive(Default)]
struct Checkout(Vec<u32>);

impl BookingPort for Checkout {
    fn confirm(&mut self, offering: &EnrichedOffering) {
        self.0.push(offering.offering.size);
    }
}

#[tokio::test]
async fn loaded_catalog_carries_positional_badges() {
    let catalog = ScriptedCatalog::new(vec![Ok(three_skips())]);
    let mut service = SkipSelectionService::new(catalog.clone(), LocationQuery::default());

    assert_eq!(service.load().await, LoadStatus::Ready);

    let snapshot = service.snapshot();
    let popular: Vec<_> = snapshot
        .offerings
        .iter()
        .filter(|view| view.offering.badges.most_popular)
        .map(|view| view.offering.id())
        .collect();
    let value: Vec<_> = snapshot
        .offerings
        .iter()
        .filter(|view| view.offering.badges.best_value)
        .map(|view| view.offering.id())
        .collect();

    assert_eq!(popular, vec![OfferingId(2)]);
    assert_eq!(value, vec![OfferingId(3)]);
    assert!(snapshot.selected.is_none());
    assert_eq!(
        *catalog.queries.lock().expect("queries lock"),
        vec![LocationQuery::new("NR32", "Lowestoft")]
    );
}

#[tokio::test]
async fn selecting_shows_details_and_focuses_once() {
    let catalog = ScriptedCatalog::new(vec![Ok(three_skips())]);
    let mut service = SkipSelectionService::new(catalog, LocationQuery::default());
    let mut events = service.subscribe();
    service.load().await;

    assert!(service.select(OfferingId(1)));
    let snapshot = service.snapshot();
    assert!(snapshot.details_visible);
    assert_eq!(
        snapshot.selected.map(|view| view.offering.id()),
        Some(OfferingId(1))
    );
    assert_eq!(
        events.try_recv().ok(),
        Some(ViewEvent::FocusDetails { id: OfferingId(1) })
    );
    assert!(events.try_recv().is_err());

    assert!(!service.select(OfferingId(99)));
    assert_eq!(service.view_model().selected_id(), Some(OfferingId(1)));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn forbidden_offering_cannot_be_selected() {
    let mut offerings = three_skips();
    offerings.push(skip(4, 40, true));
    let catalog = ScriptedCatalog::new(vec![Ok(offerings)]);
    let mut service = SkipSelectionService::new(catalog, LocationQuery::default());
    service.load().await;

    assert!(!service.select(OfferingId(4)));
    assert_eq!(service.view_model().selected_id(), None);

    service.select(OfferingId(2));
    assert!(!service.select(OfferingId(4)));
    assert_eq!(service.view_model().selected_id(), Some(OfferingId(2)));
}

#[tokio::test]
async fn server_error_fails_the_load() {
    let catalog = ScriptedCatalog::new(vec![Err(500)]);
    let mut service = SkipSelectionService::new(catalog, LocationQuery::default());

    assert_eq!(service.load().await, LoadStatus::Failed);
    let snapshot = service.snapshot();
    assert!(snapshot.offerings.is_empty());
    assert!(snapshot.selected.is_none());
    assert!(!service.select(OfferingId(1)));
}

#[tokio::test]
async fn reload_drops_previous_selection() {
    let catalog = ScriptedCatalog::new(vec![Ok(three_skips()), Ok(three_skips())]);
    let mut service = SkipSelectionService::new(catalog, LocationQuery::default());
    service.load().await;
    service.select(OfferingId(3));

    assert_eq!(service.load().await, LoadStatus::Ready);
    assert_eq!(service.view_model().selected_id(), None);
    assert_eq!(service.snapshot().offerings.len(), 3);
}

#[tokio::test]
async fn price_including_tax_is_exact() {
    let mut offering = skip(1, 4, false);
    offering.price_before_tax = dec!(100);
    let catalog = ScriptedCatalog::new(vec![Ok(vec![offering])]);
    let mut service = SkipSelectionService::new(catalog, LocationQuery::default());
    service.load().await;

    let price = service
        .snapshot()
        .offerings
        .first()
        .map(|view| view.price_including_tax);
    assert_eq!(price, Some(dec!(120.0)));
}

#[tokio::test]
async fn confirm_reports_the_selected_offering() {
    let catalog = ScriptedCatalog::new(vec![Ok(three_skips())]);
    let mut service = SkipSelectionService::new(catalog, LocationQuery::default());
    service.load().await;
    let mut checkout = Checkout::default();

    assert!(!service.confirm(&mut checkout));
    service.select(OfferingId(2));
    assert!(service.confirm(&mut checkout));
    service.clear();
    assert!(!service.confirm(&mut checkout));

    assert_eq!(checkout.0, vec![6]);
}
