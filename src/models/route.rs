//! Route model: a trail inside a park

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ImageRef, Park};

/// Normalized route, ready for filtering and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: u64,
    pub name: String,
    pub length: Length,
    pub difficulty: Difficulty,
    /// Human-readable difficulty as the server labelled it (may be empty)
    pub difficulty_label: String,
    pub status: RouteStatus,
    pub park: Option<Park>,
    pub image: ImageRef,
    pub description: Option<String>,
    pub duration: Option<String>,
    /// Meters climbed; only present when strictly positive
    pub elevation_gain: Option<u32>,
    pub activity: ActivityType,
    pub highlights: Vec<String>,
}

impl Route {
    #[must_use]
    pub fn park_name(&self) -> Option<&str> {
        self.park.as_ref().map(|p| p.name.as_str())
    }

    /// Server label when present, otherwise the canonical one
    #[must_use]
    pub fn display_difficulty(&self) -> &str {
        if self.difficulty_label.trim().is_empty() {
            self.difficulty.label()
        } else {
            &self.difficulty_label
        }
    }
}

/// Trail length kept as the text the server sent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(String);

impl Length {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        &self.0
    }

    /// Kilometers, or `None` when the text is not a non-negative number
    #[must_use]
    pub fn km(&self) -> Option<f64> {
        self.0
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|km| km.is_finite() && *km >= 0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.trim().is_empty() {
            write!(f, "-- km")
        } else {
            write!(f, "{} km", self.0.trim())
        }
    }
}

/// Closed difficulty domain; unrecognized levels degrade to `Unrated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Unrated,
}

impl Difficulty {
    /// The three selectable levels, in facet order
    pub const LEVELS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    #[must_use]
    pub fn from_level(level: Option<i64>) -> Self {
        match level {
            Some(1) => Difficulty::Easy,
            Some(2) => Difficulty::Moderate,
            Some(3) => Difficulty::Hard,
            _ => Difficulty::Unrated,
        }
    }

    /// Canonical identifier used for filtering
    #[must_use]
    pub fn level(&self) -> Option<u8> {
        match self {
            Difficulty::Easy => Some(1),
            Difficulty::Moderate => Some(2),
            Difficulty::Hard => Some(3),
            Difficulty::Unrated => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::Unrated => "Level",
        }
    }

    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Difficulty::Easy => "🟢",
            Difficulty::Moderate => "🟡",
            Difficulty::Hard => "🔴",
            Difficulty::Unrated => "⚪",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStatus {
    Open,
    Closed,
    Maintenance,
    Other(String),
}

impl RouteStatus {
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return RouteStatus::Open;
        };
        match raw.to_uppercase().as_str() {
            "ABERTA" | "OPEN" => RouteStatus::Open,
            "FECHADA" | "CLOSED" => RouteStatus::Closed,
            "EM_MANUTENCAO" | "MAINTENANCE" => RouteStatus::Maintenance,
            _ => RouteStatus::Other(raw.to_string()),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            RouteStatus::Open => "Open".to_string(),
            RouteStatus::Closed => "Closed".to_string(),
            RouteStatus::Maintenance => "Under maintenance".to_string(),
            RouteStatus::Other(raw) => {
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>()
                            + &chars.as_str().to_lowercase().replace('_', " ")
                    }
                    None => String::new(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivityType {
    Walking,
    Cycling,
    #[default]
    Trail,
}

impl ActivityType {
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("caminhada" | "walking") => ActivityType::Walking,
            Some("ciclismo" | "cycling") => ActivityType::Cycling,
            _ => ActivityType::Trail,
        }
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityType::Walking => "🚶",
            ActivityType::Cycling => "🚴",
            ActivityType::Trail => "🥾",
        }
    }
}
