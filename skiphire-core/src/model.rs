//! Domain data structures for skip offerings, their badges, and load state.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Postcode used when no location is configured.
pub const DEFAULT_POSTCODE: &str = "NR32";
/// Area used when no location is configured.
pub const DEFAULT_AREA: &str = "Lowestoft";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier of an offering, unique within one catalog response.
pub struct OfferingId(pub u64);

impl fmt::Display for OfferingId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Location the catalog is queried for.
pub struct LocationQuery {
    /// Outward postcode, e.g. `NR32`.
    pub postcode: String,
    /// Town or area name.
    pub area: String,
}

impl LocationQuery {
    /// Construct a new location query.
    #[must_use]
    pub fn new<P: Into<String>, A: Into<String>>(postcode: P, area: A) -> Self {
        Self {
            postcode: postcode.into(),
            area: area.into(),
        }
    }
}

impl Default for LocationQuery {
    fn default() -> Self {
        Self::new(DEFAULT_POSTCODE, DEFAULT_AREA)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One rentable skip as returned by the catalog service.
pub struct Offering {
    /// Catalog identifier.
    pub id: OfferingId,
    /// Capacity in yards.
    pub size: u32,
    /// Hire price without tax.
    pub price_before_tax: Decimal,
    /// Tax rate in percent, `20` meaning 20%.
    pub tax_rate_percent: Decimal,
    /// Length of the hire in days.
    pub hire_period_days: u32,
    /// Whether the skip may be placed on a public road.
    pub allowed_on_road: bool,
    /// Whether heavy waste (soil, rubble) is accepted.
    pub allows_heavy_waste: bool,
    /// Area the offering applies to.
    pub area: String,
    /// Postcode the offering applies to.
    pub postcode: String,
    /// Forbidden offerings are listed but can never be selected.
    pub forbidden: bool,
    /// Cost per tonne of waste, when the provider quotes one.
    pub per_tonne_cost: Option<Decimal>,
    /// Delivery cost, when the provider quotes one.
    pub transport_cost: Option<Decimal>,
    /// Creation timestamp reported by the provider.
    pub created_at: NaiveDateTime,
    /// Last update timestamp reported by the provider.
    pub updated_at: NaiveDateTime,
}

impl Offering {
    /// Price including tax: `price_before_tax * (1 + tax_rate_percent / 100)`.
    ///
    /// The value is kept at full precision; rounding for display is left to renderers.
    #[must_use]
    pub fn price_including_tax(&self) -> Decimal {
        self.price_before_tax * (Decimal::ONE + self.tax_rate_percent / Decimal::ONE_HUNDRED)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Badges assigned once, when a catalog response is enriched.
pub struct Badges {
    /// Marked as the most popular offering.
    pub most_popular: bool,
    /// Marked as the best value offering.
    pub best_value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Offering together with its enrichment-time badges.
pub struct EnrichedOffering {
    /// Raw catalog record.
    pub offering: Offering,
    /// Badges assigned by the loader.
    pub badges: Badges,
}

impl EnrichedOffering {
    /// Identifier of the wrapped offering.
    #[must_use]
    pub fn id(&self) -> OfferingId {
        self.offering.id
    }

    /// Whether this offering may become the selection.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.offering.forbidden
    }

    /// Price including tax of the wrapped offering.
    #[must_use]
    pub fn price_including_tax(&self) -> Decimal {
        self.offering.price_including_tax()
    }

    /// Presentation tags derived purely from this offering.
    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        let offering = &self.offering;
        let mut tags = Vec::with_capacity(5);

        tags.push(if offering.allowed_on_road {
            Tag::RoadApproved
        } else {
            Tag::RoadDenied
        });
        if offering.allows_heavy_waste {
            tags.push(Tag::HeavyWasteAllowed);
        }
        if self.badges.most_popular {
            tags.push(Tag::MostPopular);
        }
        if self.badges.best_value {
            tags.push(Tag::BestValue);
        }
        if offering.forbidden {
            tags.push(Tag::Unavailable);
        }

        tags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Presentation tag attached to an offering.
pub enum Tag {
    /// Allowed on a public road.
    RoadApproved,
    /// Not allowed on a public road.
    RoadDenied,
    /// Accepts heavy waste.
    HeavyWasteAllowed,
    /// Carries the most popular badge.
    MostPopular,
    /// Carries the best value badge.
    BestValue,
    /// Forbidden, cannot be selected.
    Unavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Lifecycle of one catalog fetch.
pub enum LoadStatus {
    /// A fetch is in flight, or none has completed yet.
    #[default]
    Loading,
    /// The catalog was fetched and parsed, possibly empty.
    Ready,
    /// The fetch failed in transport or parsing.
    Failed,
}
