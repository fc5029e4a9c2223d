//! Attraction model: a point of interest or event inside a park

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Coordinates, ImageRef, Park};

/// Normalized attraction, ready for filtering and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: ImageRef,
    /// `None` when the server nulled the park reference
    pub park: Option<Park>,
    pub tags: Vec<String>,
    /// Event date or opening hours, whichever field the record carried
    pub schedule: Option<String>,
    /// Own location, falling back to the park's
    pub location: Option<String>,
    pub contact: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// How a resolved schedule string should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// Looks like a calendar date; parsed when the format is known
    EventDate(Option<NaiveDate>),
    OpeningHours,
}

impl ScheduleKind {
    #[must_use]
    pub fn classify(schedule: &str) -> Self {
        let trimmed = schedule.trim();
        let parsed = ["%Y-%m-%d", "%d/%m/%Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok());

        match parsed {
            Some(date) => ScheduleKind::EventDate(Some(date)),
            None if trimmed.contains('-') || trimmed.contains('/') => ScheduleKind::EventDate(None),
            None => ScheduleKind::OpeningHours,
        }
    }

    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            ScheduleKind::EventDate(_) => "Event date",
            ScheduleKind::OpeningHours => "Opening hours",
        }
    }
}

/// Presentation category of a free-form tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTone {
    Nature,
    Culture,
    Adventure,
    Food,
    Tourism,
    Neutral,
}

impl TagTone {
    #[must_use]
    pub fn of(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        if tag.contains("natureza") {
            TagTone::Nature
        } else if tag.contains("cultura") {
            TagTone::Culture
        } else if tag.contains("aventura") {
            TagTone::Adventure
        } else if tag.contains("gastronomia") {
            TagTone::Food
        } else if tag.contains("turismo") {
            TagTone::Tourism
        } else {
            TagTone::Neutral
        }
    }

    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            TagTone::Nature => "🌿",
            TagTone::Culture => "🎭",
            TagTone::Adventure => "🧗",
            TagTone::Food => "🍽️",
            TagTone::Tourism => "🧭",
            TagTone::Neutral => "🏷️",
        }
    }
}

impl Attraction {
    #[must_use]
    pub fn park_name(&self) -> Option<&str> {
        self.park.as_ref().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn schedule_kind(&self) -> Option<ScheduleKind> {
        self.schedule.as_deref().map(ScheduleKind::classify)
    }

    /// Case-insensitive tag membership
    #[must_use]
    pub fn has_tag(&self, wanted: &str) -> bool {
        let wanted = wanted.to_lowercase();
        self.tags.iter().any(|tag| tag.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-03-14", ScheduleKind::EventDate(NaiveDate::from_ymd_opt(2025, 3, 14)))]
    #[case("14/03/2025", ScheduleKind::EventDate(NaiveDate::from_ymd_opt(2025, 3, 14)))]
    #[case("Sábados 08h-12h", ScheduleKind::EventDate(None))]
    #[case("Todos os dias, 8h às 17h", ScheduleKind::OpeningHours)]
    fn test_schedule_classification(#[case] input: &str, #[case] expected: ScheduleKind) {
        assert_eq!(ScheduleKind::classify(input), expected);
    }

    #[rstest]
    #[case("Natureza", TagTone::Nature)]
    #[case("ecoturismo", TagTone::Tourism)]
    #[case("AVENTURA radical", TagTone::Adventure)]
    #[case("Gastronomia", TagTone::Food)]
    #[case("Música", TagTone::Neutral)]
    fn test_tag_tone(#[case] tag: &str, #[case] expected: TagTone) {
        assert_eq!(TagTone::of(tag), expected);
    }
}
