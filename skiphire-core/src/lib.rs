//! Core types and view-model wiring for the skiphire skip selection flow.

/// Catalog loading and one-time badge enrichment.
pub mod loader;
/// Domain models and identifiers shared by providers and renderers.
pub mod model;
/// Traits describing the catalog and booking collaborators.
pub mod ports;
/// High-level service facade used by renderers.
pub mod service;
/// Selection state, intents, and the derived read model.
pub mod view_model;

pub use loader::*;
pub use model::*;
pub use ports::*;
pub use service::*;
pub use view_model::*;
