//! `Tereverde` - Park attractions and trail catalog client
//!
//! This library fetches the attraction and route catalogs of a park
//! network, normalizes their loosely-typed records, and provides
//! client-side facet extraction and filtering over them.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod directions;
pub mod error;
pub mod logging;
pub mod models;
pub mod present;

// Re-export core types for public API
pub use catalog::{
    AttractionSelection, CatalogEntity, CatalogSource, CollectionView, EntityKind, Facet,
    HttpCatalogSource, MountedView, RouteSelection, ViewState,
};
pub use config::CatalogConfig;
pub use directions::{MapQuery, Navigator, PrintNavigator};
pub use error::CatalogError;
pub use models::{Attraction, Difficulty, Park, Route};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CatalogError>;
