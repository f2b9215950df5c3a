//! Reference catalog: the index-aligned tables every lookup runs against.

/// Progressive loading from JSON files.
pub mod loader;
/// Validated in-memory catalog.
pub mod model;
