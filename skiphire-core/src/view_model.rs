//! Selection state, the two user intents, and the derived read model.

use rust_decimal::Decimal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::loader::LoadResult;
use crate::model::{EnrichedOffering, LoadStatus, OfferingId, Tag};
use crate::ports::BookingPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Notifications published to renderers.
pub enum ViewEvent {
    /// The details view just became visible and should be brought into view.
    FocusDetails {
        /// Offering shown in the details view.
        id: OfferingId,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Presentation-ready view of one offering.
pub struct OfferingView<'a> {
    /// Underlying enriched offering.
    pub offering: &'a EnrichedOffering,
    /// Full precision price including tax.
    pub price_including_tax: Decimal,
    /// Tags derived from the offering's own fields.
    pub tags: Vec<Tag>,
    /// Whether this offering is the current selection.
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// Read-only snapshot handed to renderers.
pub struct Snapshot<'a> {
    /// All offerings in catalog order.
    pub offerings: Vec<OfferingView<'a>>,
    /// The selected offering, if any.
    pub selected: Option<OfferingView<'a>>,
    /// State of the catalog fetch.
    pub load_status: LoadStatus,
    /// True iff an offering is selected.
    pub details_visible: bool,
}

/// Owns the offering list and the single selection.
///
/// State changes only through [`Self::on_fetch_started`], [`Self::on_catalog_loaded`],
/// [`Self::select`] and [`Self::clear`]. The selection, when set, always refers to
/// a non-forbidden offering of the current list.
#[derive(Debug, Default)]
pub struct SelectionViewModel {
    offerings: Vec<EnrichedOffering>,
    selected_id: Option<OfferingId>,
    load_status: LoadStatus,
    subscribers: Vec<UnboundedSender<ViewEvent>>,
}

impl SelectionViewModel {
    /// Initial state: loading, no offerings, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for [`ViewEvent`]s.
    ///
    /// Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> UnboundedReceiver<ViewEvent> {
        self.subscribers.retain(|subscriber| !subscriber.is_closed());
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.push(sender);
        receiver
    }

    /// A new fetch began: drop the previous catalog and selection.
    pub fn on_fetch_started(&mut self) {
        self.offerings = Vec::new();
        self.selected_id = None;
        self.load_status = LoadStatus::Loading;
    }

    /// Replace the catalog with the outcome of a fetch. The selection is reset.
    pub fn on_catalog_loaded(&mut self, result: LoadResult) {
        let (status, offerings) = result.into_parts();
        self.offerings = offerings;
        self.load_status = status;
        self.selected_id = None;
    }

    /// Select an offering by id.
    ///
    /// Unknown and forbidden offerings are ignored and `false` is returned.
    pub fn select(&mut self, id: OfferingId) -> bool {
        let Some(target) = self.find(id) else {
            debug!(%id, "ignoring selection of unknown offering");
            return false;
        };
        if !target.is_selectable() {
            debug!(%id, "ignoring selection of forbidden offering");
            return false;
        }

        let was_visible = self.details_visible();
        self.selected_id = Some(id);
        debug!(%id, "offering selected");

        if !was_visible {
            self.publish(ViewEvent::FocusDetails { id });
        }
        true
    }

    /// Drop the current selection, if any.
    pub fn clear(&mut self) {
        if self.selected_id.take().is_some() {
            debug!("selection cleared");
        }
    }

    /// Hand the selected offering to the booking collaborator.
    ///
    /// Returns `false` without calling `booking` when nothing is selected.
    pub fn confirm<B: BookingPort + ?Sized>(&self, booking: &mut B) -> bool {
        let Some(offering) = self.selected_offering() else {
            debug!("ignoring confirmation without a selection");
            return false;
        };
        booking.confirm(offering);
        true
    }

    /// Offerings in catalog order.
    #[must_use]
    pub fn offerings(&self) -> &[EnrichedOffering] {
        &self.offerings
    }

    /// Identifier of the selected offering.
    #[must_use]
    pub fn selected_id(&self) -> Option<OfferingId> {
        self.selected_id
    }

    /// The selected offering, looked up in the current list.
    #[must_use]
    pub fn selected_offering(&self) -> Option<&EnrichedOffering> {
        self.selected_id.and_then(|id| self.find(id))
    }

    /// State of the catalog fetch.
    #[must_use]
    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    /// Whether the details view is shown.
    #[must_use]
    pub fn details_visible(&self) -> bool {
        self.selected_offering().is_some()
    }

    /// Derive the read model. Nothing here is cached.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let offerings: Vec<OfferingView<'_>> =
            self.offerings.iter().map(|item| self.view(item)).collect();
        let selected = self.selected_offering().map(|item| self.view(item));

        Snapshot {
            details_visible: selected.is_some(),
            offerings,
            selected,
            load_status: self.load_status,
        }
    }

    fn view<'a>(&self, offering: &'a EnrichedOffering) -> OfferingView<'a> {
        OfferingView {
            offering,
            price_including_tax: offering.price_including_tax(),
            tags: offering.tags(),
            selected: self.selected_id == Some(offering.id()),
        }
    }

    fn find(&self, id: OfferingId) -> Option<&EnrichedOffering> {
        self.offerings.iter().find(|item| item.id() == id)
    }

    fn publish(&mut self, event: ViewEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event).is_ok());
    }
}
