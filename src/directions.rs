//! Directions: map-search URLs for attractions and routes
//!
//! Opening the URL is best-effort; navigators report nothing back.

use tracing::{debug, info};

use crate::config::DirectionsConfig;
use crate::models::{Attraction, Coordinates, Route};
use crate::present::PARK_NOT_INFORMED;

/// What a map search is asked to find
#[derive(Debug, Clone, PartialEq)]
pub enum MapQuery {
    Point(Coordinates),
    Text(String),
}

impl MapQuery {
    fn named(name: &str, park: Option<&str>, region: &str) -> Self {
        let park = park.unwrap_or(PARK_NOT_INFORMED);
        MapQuery::Text(format!("{name}, {park}, {region}"))
    }

    #[must_use]
    pub fn for_attraction(attraction: &Attraction, region: &str) -> Self {
        match attraction.coordinates {
            Some(point) => MapQuery::Point(point),
            None => Self::named(&attraction.title, attraction.park_name(), region),
        }
    }

    /// Routes carry no coordinates, so they are always searched by name
    #[must_use]
    pub fn for_route(route: &Route, region: &str) -> Self {
        Self::named(&route.name, route.park_name(), region)
    }

    fn encoded(&self) -> String {
        match self {
            MapQuery::Point(point) => format!("{},{}", point.latitude, point.longitude),
            MapQuery::Text(text) => urlencoding::encode(text).into_owned(),
        }
    }
}

#[must_use]
pub fn directions_url(query: &MapQuery, config: &DirectionsConfig) -> String {
    format!("{}{}", config.maps_search_url, query.encoded())
}

/// Opens a navigation target
pub trait Navigator {
    fn open(&self, url: &str);
}

/// Prints the target so the user (or a wrapping script) can follow it
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&self, url: &str) {
        info!("Opening directions");
        println!("🗺️  {url}");
    }
}

pub fn navigate(navigator: &dyn Navigator, query: &MapQuery, config: &DirectionsConfig) {
    let url = directions_url(query, config);
    debug!(?query, %url, "Directions requested");
    navigator.open(&url);
}
