//! Catalog loading with one-time badge enrichment.

use std::sync::Arc;

use tracing::{info, warn};

use crate::model::{Badges, EnrichedOffering, LoadStatus, LocationQuery, Offering};
use crate::ports::CatalogPort;

/// Response position that receives the most popular badge.
const MOST_POPULAR_INDEX: usize = 1;
/// Response position that receives the best value badge.
const BEST_VALUE_INDEX: usize = 2;

/// Assign badges to a freshly fetched catalog, keeping response order.
///
/// The rule is positional: the second offering is marked most popular and the
/// third best value. It is a placeholder policy and does not rank anything.
#[must_use]
pub fn enrich(offerings: Vec<Offering>) -> Vec<EnrichedOffering> {
    offerings
        .into_iter()
        .enumerate()
        .map(|(index, offering)| EnrichedOffering {
            offering,
            badges: Badges {
                most_popular: index == MOST_POPULAR_INDEX,
                best_value: index == BEST_VALUE_INDEX,
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
/// Outcome of one catalog fetch cycle.
///
/// Only [`Self::ready`] and [`Self::failed`] build one, so a finished load is never `Loading`.
pub struct LoadResult {
    status: LoadStatus,
    offerings: Vec<EnrichedOffering>,
}

impl LoadResult {
    /// Successful load, possibly with no offerings.
    #[must_use]
    pub fn ready(offerings: Vec<EnrichedOffering>) -> Self {
        Self {
            status: LoadStatus::Ready,
            offerings,
        }
    }

    /// Failed load carrying no offerings.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            status: LoadStatus::Failed,
            offerings: Vec::new(),
        }
    }

    /// `Ready` or `Failed`.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Enriched offerings, empty when the load failed.
    #[must_use]
    pub fn offerings(&self) -> &[EnrichedOffering] {
        &self.offerings
    }

    /// Split into status and offerings.
    #[must_use]
    pub fn into_parts(self) -> (LoadStatus, Vec<EnrichedOffering>) {
        (self.status, self.offerings)
    }
}

/// Fetches a catalog through a [`CatalogPort`] and enriches it.
pub struct CatalogLoader {
    port: Arc<dyn CatalogPort>,
}

impl CatalogLoader {
    /// Create a loader bound to the given catalog backend.
    #[must_use]
    pub fn new(port: Arc<dyn CatalogPort>) -> Self {
        Self { port }
    }

    /// Issue one catalog request and fold any failure into [`LoadStatus::Failed`].
    pub async fn load(&self, query: &LocationQuery) -> LoadResult {
        info!(postcode = %query.postcode, area = %query.area, "loading skip catalog");

        match self.port.fetch(query).await {
            Ok(offerings) => {
                let enriched = enrich(offerings);
                info!(count = enriched.len(), "skip catalog loaded");
                LoadResult::ready(enriched)
            }
            Err(err) => {
                warn!(error = %err, "skip catalog failed to load");
                LoadResult::failed()
            }
        }
    }
}
