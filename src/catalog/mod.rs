//! Catalog module
//!
//! Client-side catalog logic shared by the attractions and routes views:
//! - Entity normalization of heterogeneous wire records
//! - Facet extraction (parks, tags, difficulty levels)
//! - Filter evaluation over facet selections
//! - Collection view state machine and its data source

pub mod facets;
pub mod filter;
pub mod normalize;
pub mod source;
pub mod view;

use std::fmt;

use crate::Result;
use crate::config::{ApiConfig, AssetDefaults};
use crate::models::{Attraction, RawAttraction, RawRoute, Route};

pub use facets::{AttractionFacets, FacetCache, RouteFacets};
pub use filter::{AttractionSelection, Facet, RouteSelection};
pub use source::{CatalogSource, HttpCatalogSource};
pub use view::{CollectionView, MountedView, ViewState};

/// Which remote collection a view is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Attractions,
    Routes,
}

impl EntityKind {
    #[must_use]
    pub fn endpoint_path<'a>(&self, api: &'a ApiConfig) -> &'a str {
        match self {
            EntityKind::Attractions => &api.attractions_path,
            EntityKind::Routes => &api.routes_path,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Attractions => f.write_str("attractions"),
            EntityKind::Routes => f.write_str("routes"),
        }
    }
}

/// Everything a `CollectionView` needs to know about one entity kind
pub trait CatalogEntity: Clone + Send + Sync + 'static {
    type Raw: serde::de::DeserializeOwned;
    type Selection: Clone + Default + fmt::Debug + Send;
    type Facets: fmt::Debug + Send + Sync;

    const KIND: EntityKind;

    fn normalize(raw: Self::Raw, assets: &AssetDefaults) -> Result<Self>;
    fn id(&self) -> u64;
    fn park_name(&self) -> Option<&str>;
    fn matches(&self, selection: &Self::Selection) -> bool;
    fn extract_facets(collection: &[Self]) -> Self::Facets;
    fn park_selection(selection: &mut Self::Selection) -> &mut Facet<String>;
}

impl CatalogEntity for Attraction {
    type Raw = RawAttraction;
    type Selection = AttractionSelection;
    type Facets = AttractionFacets;

    const KIND: EntityKind = EntityKind::Attractions;

    fn normalize(raw: RawAttraction, assets: &AssetDefaults) -> Result<Self> {
        normalize::normalize_attraction(raw, assets)
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn park_name(&self) -> Option<&str> {
        Attraction::park_name(self)
    }

    fn matches(&self, selection: &AttractionSelection) -> bool {
        filter::attraction_matches(self, selection)
    }

    fn extract_facets(collection: &[Self]) -> AttractionFacets {
        facets::attraction_facets(collection)
    }

    fn park_selection(selection: &mut AttractionSelection) -> &mut Facet<String> {
        &mut selection.park
    }
}

impl CatalogEntity for Route {
    type Raw = RawRoute;
    type Selection = RouteSelection;
    type Facets = RouteFacets;

    const KIND: EntityKind = EntityKind::Routes;

    fn normalize(raw: RawRoute, assets: &AssetDefaults) -> Result<Self> {
        normalize::normalize_route(raw, assets)
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn park_name(&self) -> Option<&str> {
        Route::park_name(self)
    }

    fn matches(&self, selection: &RouteSelection) -> bool {
        filter::route_matches(self, selection)
    }

    fn extract_facets(collection: &[Self]) -> RouteFacets {
        facets::route_facets(collection)
    }

    fn park_selection(selection: &mut RouteSelection) -> &mut Facet<String> {
        &mut selection.park
    }
}
