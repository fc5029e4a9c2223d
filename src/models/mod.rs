//! Data models for the park catalogs
//!
//! - Park: parent entity embedded in every record
//! - Attraction: points of interest and events
//! - Route: trails with length, difficulty and status
//! - raw: the wire shapes before normalization

pub mod attraction;
pub mod park;
pub mod raw;
pub mod route;

use serde::{Deserialize, Serialize};

pub use attraction::{Attraction, ScheduleKind, TagTone};
pub use park::Park;
pub use raw::{RawAttraction, RawPark, RawRoute};
pub use route::{ActivityType, Difficulty, Length, Route, RouteStatus};

/// Image shown for an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageRef {
    Provided(String),
    /// Collaborator-supplied default asset
    Placeholder(String),
}

impl ImageRef {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            ImageRef::Provided(url) | ImageRef::Placeholder(url) => url,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageRef::Placeholder(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Both parts must parse and lie inside the valid degree ranges
    #[must_use]
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let latitude: f64 = latitude.trim().parse().ok()?;
        let longitude: f64 = longitude.trim().parse().ok()?;
        ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
            .then_some(Self {
                latitude,
                longitude,
            })
    }
}
