//! High-level service facade combining the loader and the view-model.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::loader::CatalogLoader;
use crate::model::{LoadStatus, LocationQuery, OfferingId};
use crate::ports::{BookingPort, CatalogPort};
use crate::view_model::{SelectionViewModel, Snapshot, ViewEvent};

/// Public entry point for renderers: one location, one catalog, one selection.
pub struct SkipSelectionService {
    loader: CatalogLoader,
    query: LocationQuery,
    view_model: SelectionViewModel,
}

impl SkipSelectionService {
    /// Create a service for `query` backed by the provided catalog.
    #[must_use]
    pub fn new(port: Arc<dyn CatalogPort>, query: LocationQuery) -> Self {
        Self {
            loader: CatalogLoader::new(port),
            query,
            view_model: SelectionViewModel::new(),
        }
    }

    /// Location this service loads offerings for.
    #[must_use]
    pub fn query(&self) -> &LocationQuery {
        &self.query
    }

    /// Run one fetch cycle and return the resulting status.
    ///
    /// The previous catalog and selection are discarded before the request is sent.
    pub async fn load(&mut self) -> LoadStatus {
        self.view_model.on_fetch_started();
        let result = self.loader.load(&self.query).await;
        self.view_model.on_catalog_loaded(result);
        self.view_model.load_status()
    }

    /// Select an offering; see [`SelectionViewModel::select`].
    pub fn select(&mut self, id: OfferingId) -> bool {
        self.view_model.select(id)
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.view_model.clear();
    }

    /// Confirm the selection with a booking collaborator.
    pub fn confirm<B: BookingPort + ?Sized>(&self, booking: &mut B) -> bool {
        self.view_model.confirm(booking)
    }

    /// Subscribe to view events.
    pub fn subscribe(&mut self) -> UnboundedReceiver<ViewEvent> {
        self.view_model.subscribe()
    }

    /// Current read model.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.view_model.snapshot()
    }

    /// Underlying view-model.
    #[must_use]
    pub fn view_model(&self) -> &SelectionViewModel {
        &self.view_model
    }
}
