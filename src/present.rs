//! Text presenters for cards, details, facet lists and the empty state

use std::fmt::{self, Display};

use crate::catalog::{AttractionFacets, RouteFacets};
use crate::models::{Attraction, ImageRef, Route, TagTone};

pub const EMPTY_STATE: &str = "No results found.";
pub const PARK_NOT_INFORMED: &str = "Park not informed";
pub const ATTRACTION_NO_DESCRIPTION: &str = "Detailed description not available at the moment.";
pub const ROUTE_NO_DESCRIPTION: &str = "No description available at the moment.";
pub const SAFETY_TIP: &str = "Park tip: check the weather forecast before heading out. \
    Bring water and sunscreen, and wear footwear suited to uneven terrain.";

/// Tags shown on a card; details show them all
pub const CARD_TAG_LIMIT: usize = 3;

const MISSING: &str = "--";

fn write_tags(f: &mut fmt::Formatter<'_>, tags: &[String]) -> fmt::Result {
    if tags.is_empty() {
        return Ok(());
    }
    let rendered: Vec<String> = tags
        .iter()
        .map(|tag| format!("{} {}", TagTone::of(tag).marker(), tag))
        .collect();
    writeln!(f, "   {}", rendered.join("  "))
}

fn write_image(f: &mut fmt::Formatter<'_>, image: &ImageRef) -> fmt::Result {
    if image.is_placeholder() {
        writeln!(f, "   🖼️ {} (default image)", image.url())
    } else {
        writeln!(f, "   🖼️ {}", image.url())
    }
}

pub struct AttractionCard<'a>(pub &'a Attraction);

impl Display for AttractionCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attraction = self.0;
        writeln!(f, "[{}] {}", attraction.id, attraction.title)?;
        writeln!(f, "   📍 {}", attraction.park_name().unwrap_or(PARK_NOT_INFORMED))?;
        if let Some(schedule) = &attraction.schedule {
            writeln!(f, "   📅 {schedule}")?;
        }
        let shown = attraction.tags.len().min(CARD_TAG_LIMIT);
        write_tags(f, &attraction.tags[..shown])
    }
}

pub struct AttractionDetail<'a>(pub &'a Attraction);

impl Display for AttractionDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attraction = self.0;
        writeln!(f, "{}", attraction.title)?;
        writeln!(f, "   🌳 {}", attraction.park_name().unwrap_or(PARK_NOT_INFORMED))?;
        write_image(f, &attraction.image)?;

        let description = attraction.description.trim();
        if description.is_empty() {
            writeln!(f, "\n{ATTRACTION_NO_DESCRIPTION}\n")?;
        } else {
            writeln!(f, "\n{description}\n")?;
        }

        if let (Some(schedule), Some(kind)) = (&attraction.schedule, attraction.schedule_kind()) {
            writeln!(f, "   📅 {}: {}", kind.heading(), schedule)?;
        }
        if let Some(location) = &attraction.location {
            writeln!(f, "   🗺️ Location: {location}")?;
        }
        if let Some(contact) = &attraction.contact {
            writeln!(f, "   📞 Contact: {contact}")?;
        }
        write_tags(f, &attraction.tags)
    }
}

pub struct RouteCard<'a>(pub &'a Route);

impl Display for RouteCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.0;
        writeln!(f, "[{}] {} {}", route.id, route.activity.icon(), route.name)?;
        writeln!(f, "   📍 {}", route.park_name().unwrap_or(PARK_NOT_INFORMED))?;
        writeln!(
            f,
            "   📏 {}   {} {}   {}",
            route.length,
            route.difficulty.marker(),
            route.display_difficulty(),
            route.status.label()
        )
    }
}

pub struct RouteDetail<'a>(pub &'a Route);

impl Display for RouteDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.0;
        writeln!(f, "{} {}", route.activity.icon(), route.name)?;
        writeln!(f, "   🌳 {}", route.park_name().unwrap_or(PARK_NOT_INFORMED))?;
        writeln!(f, "   🚦 {}", route.status.label())?;
        write_image(f, &route.image)?;

        match route.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => writeln!(f, "\n{description}\n")?,
            _ => writeln!(f, "\n{ROUTE_NO_DESCRIPTION}\n")?,
        }

        writeln!(f, "   📏 Distance: {}", route.length)?;
        writeln!(
            f,
            "   {} Difficulty: {}",
            route.difficulty.marker(),
            route.display_difficulty()
        )?;
        writeln!(f, "   ⏱️ Duration: {}", route.duration.as_deref().unwrap_or(MISSING))?;
        match route.elevation_gain {
            Some(meters) => writeln!(f, "   ⛰️ Elevation: {meters}m")?,
            None => writeln!(f, "   ⛰️ Elevation: {MISSING}")?,
        }

        if !route.highlights.is_empty() {
            writeln!(f, "\nHighlights:")?;
            for highlight in &route.highlights {
                writeln!(f, "   ✓ {highlight}")?;
            }
        }

        writeln!(f, "\n💡 {SAFETY_TIP}")
    }
}

/// Renders one card per entity, or the empty-state message
pub fn render_list<'a, E, C: Display>(entities: &[&'a E], card: impl Fn(&'a E) -> C) -> String {
    if entities.is_empty() {
        return format!("{EMPTY_STATE}\n");
    }
    entities
        .iter()
        .map(|entity| card(*entity).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_parks(f: &mut fmt::Formatter<'_>, parks: &[String]) -> fmt::Result {
    writeln!(f, "Parks:")?;
    writeln!(f, "   All")?;
    for park in parks {
        writeln!(f, "   {park}")?;
    }
    Ok(())
}

impl Display for AttractionFacets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_parks(f, &self.parks)?;
        writeln!(f, "Categories:")?;
        for category in &self.categories {
            writeln!(f, "   {category}")?;
        }
        Ok(())
    }
}

impl Display for RouteFacets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_parks(f, &self.parks)?;
        writeln!(f, "Difficulties:")?;
        for difficulty in &self.difficulties {
            writeln!(f, "   {difficulty}")?;
        }
        Ok(())
    }
}
