//! Facet extraction
//!
//! Facets are derived from the loaded collection and memoized against the
//! collection's identity: replacing the collection invalidates them,
//! changing a selection never does.

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use super::filter::Facet;
use crate::models::{Attraction, Difficulty, Route};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttractionFacets {
    /// Distinct park names, sorted
    pub parks: Vec<String>,
    /// `Facet::All` followed by distinct tags, sorted, case-sensitive
    pub categories: Vec<Facet<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteFacets {
    pub parks: Vec<String>,
    /// Fixed: `Facet::All` then the three levels
    pub difficulties: Vec<Facet<Difficulty>>,
}

/// Distinct park display names, deduplicated by exact equality and sorted
pub fn unique_parks<'a, I>(park_names: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    park_names
        .into_iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[must_use]
pub fn attraction_facets(attractions: &[Attraction]) -> AttractionFacets {
    let tags: BTreeSet<&str> = attractions
        .iter()
        .flat_map(|a| a.tags.iter().map(String::as_str))
        .collect();

    let categories = std::iter::once(Facet::All)
        .chain(tags.into_iter().map(|tag| Facet::Only(tag.to_string())))
        .collect();

    AttractionFacets {
        parks: unique_parks(attractions.iter().map(Attraction::park_name)),
        categories,
    }
}

/// Difficulty is a closed domain, so its facet ignores the data
#[must_use]
pub fn difficulty_facets() -> Vec<Facet<Difficulty>> {
    std::iter::once(Facet::All)
        .chain(Difficulty::LEVELS.into_iter().map(Facet::Only))
        .collect()
}

#[must_use]
pub fn route_facets(routes: &[Route]) -> RouteFacets {
    RouteFacets {
        parks: unique_parks(routes.iter().map(Route::park_name)),
        difficulties: difficulty_facets(),
    }
}

/// Facets memoized by collection identity (`Arc` pointer), not contents
#[derive(Debug)]
pub struct FacetCache<E, F> {
    entry: Option<(Arc<[E]>, Arc<F>)>,
    computations: usize,
}

impl<E, F> Default for FacetCache<E, F> {
    fn default() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }
}

impl<E, F> FacetCache<E, F> {
    pub fn get_or_compute(
        &mut self,
        collection: &Arc<[E]>,
        extract: impl FnOnce(&[E]) -> F,
    ) -> Arc<F> {
        if let Some((cached_for, facets)) = &self.entry {
            if Arc::ptr_eq(cached_for, collection) {
                return Arc::clone(facets);
            }
        }

        debug!(records = collection.len(), "Recomputing facets for new collection");
        let facets = Arc::new(extract(collection.as_ref()));
        self.computations += 1;
        self.entry = Some((Arc::clone(collection), Arc::clone(&facets)));
        facets
    }

    /// How many times facets were actually extracted
    #[must_use]
    pub fn computations(&self) -> usize {
        self.computations
    }
}
