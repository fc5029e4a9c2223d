//! Facet selections and the inclusion predicates
//!
//! Clauses are conjunctive; within one facet `Facet::All` matches everything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Attraction, Difficulty, Route};
use crate::{CatalogError, Result};

/// One facet's current value, including the match-everything sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facet<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Facet<T> {
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    /// `All` passes any value; `Only` compares with `eq`
    pub fn admits<U: ?Sized>(&self, value: Option<&U>, eq: impl Fn(&T, &U) -> bool) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(wanted) => value.is_some_and(|v| eq(wanted, v)),
        }
    }
}

/// Sentinel spellings accepted on input, legacy ones included
fn is_all_sentinel(input: &str) -> bool {
    let input = input.trim();
    ["all", "todas", "todos"]
        .iter()
        .any(|sentinel| input.eq_ignore_ascii_case(sentinel))
}

impl FromStr for Facet<String> {
    type Err = CatalogError;

    fn from_str(input: &str) -> Result<Self> {
        if is_all_sentinel(input) {
            Ok(Facet::All)
        } else if input.trim().is_empty() {
            Err(CatalogError::validation("Facet value cannot be empty"))
        } else {
            Ok(Facet::Only(input.to_string()))
        }
    }
}

impl FromStr for Facet<Difficulty> {
    type Err = CatalogError;

    fn from_str(input: &str) -> Result<Self> {
        if is_all_sentinel(input) {
            return Ok(Facet::All);
        }
        let level = input.trim().parse::<i64>().ok();
        match Difficulty::from_level(level) {
            Difficulty::Unrated => Err(CatalogError::validation(format!(
                "Unknown difficulty '{input}'. Expected all, 1, 2 or 3"
            ))),
            difficulty => Ok(Facet::Only(difficulty)),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str("All"),
            Facet::Only(value) => value.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttractionSelection {
    pub category: Facet<String>,
    pub park: Facet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteSelection {
    pub difficulty: Facet<Difficulty>,
    pub park: Facet<String>,
}

/// Exact park-name clause shared by both catalogs
fn park_matches(selected: &Facet<String>, park_name: Option<&str>) -> bool {
    selected.admits(park_name, |wanted, name| wanted == name)
}

#[must_use]
pub fn attraction_matches(attraction: &Attraction, selection: &AttractionSelection) -> bool {
    let category = match &selection.category {
        Facet::All => true,
        Facet::Only(tag) => attraction.has_tag(tag),
    };
    category && park_matches(&selection.park, attraction.park_name())
}

#[must_use]
pub fn route_matches(route: &Route, selection: &RouteSelection) -> bool {
    let level = route.difficulty.level();
    let difficulty = selection
        .difficulty
        .admits(level.as_ref(), |wanted, level| wanted.level() == Some(*level));
    difficulty && park_matches(&selection.park, route.park_name())
}

/// Order-preserving subset of `items` accepted by `predicate`
pub fn apply<'a, T, S>(
    items: &'a [T],
    selection: &S,
    predicate: fn(&T, &S) -> bool,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| predicate(item, selection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityType, ImageRef, Length, Park, RouteStatus};
    use rstest::rstest;

    fn attraction(id: u64, tags: &[&str], park: &str) -> Attraction {
        Attraction {
            id,
            title: format!("Attraction {id}"),
            description: String::new(),
            image: ImageRef::Placeholder("placeholder.jpg".into()),
            park: Some(Park::new(id, park, "")),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            schedule: None,
            location: None,
            contact: None,
            coordinates: None,
        }
    }

    fn route(id: u64, level: Option<i64>, park: &str) -> Route {
        Route {
            id,
            name: format!("Route {id}"),
            length: Length::new("5.00"),
            difficulty: Difficulty::from_level(level),
            difficulty_label: String::new(),
            status: RouteStatus::Open,
            park: Some(Park::new(1, park, "")),
            image: ImageRef::Placeholder("placeholder.jpg".into()),
            description: None,
            duration: None,
            elevation_gain: None,
            activity: ActivityType::Trail,
            highlights: Vec::new(),
        }
    }

    fn scenario() -> Vec<Attraction> {
        vec![
            attraction(1, &["Natureza"], "Serra"),
            attraction(2, &["Aventura"], "Serra"),
            attraction(3, &["Natureza"], "Mar"),
        ]
    }

    fn ids<T>(items: &[&T], id: fn(&T) -> u64) -> Vec<u64> {
        items.iter().map(|item| id(item)).collect()
    }

    #[test]
    fn test_category_filter_scenario() {
        let collection = scenario();
        let selection = AttractionSelection {
            category: Facet::Only("Natureza".into()),
            park: Facet::All,
        };
        let visible = apply(&collection, &selection, attraction_matches);
        assert_eq!(ids(&visible, |a| a.id), vec![1, 3]);
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let collection = scenario();
        let selection = AttractionSelection {
            category: Facet::Only("natureza".into()),
            park: Facet::Only("Serra".into()),
        };
        let visible = apply(&collection, &selection, attraction_matches);
        assert_eq!(ids(&visible, |a| a.id), vec![1]);
    }

    #[test]
    fn test_park_is_exact_match() {
        let collection = scenario();
        let selection = AttractionSelection {
            category: Facet::All,
            park: Facet::Only("serra".into()),
        };
        assert!(apply(&collection, &selection, attraction_matches).is_empty());
    }

    #[test]
    fn test_all_sentinels_keep_everything_in_order() {
        let collection = scenario();
        let visible = apply(&collection, &AttractionSelection::default(), attraction_matches);
        assert_eq!(ids(&visible, |a| a.id), vec![1, 2, 3]);

        let routes = vec![route(5, Some(1), "A"), route(6, Some(9), "B"), route(7, None, "A")];
        let visible = apply(&routes, &RouteSelection::default(), route_matches);
        assert_eq!(ids(&visible, |r| r.id), vec![5, 6, 7]);
    }

    #[test]
    fn test_absent_park_yields_nothing() {
        let collection = scenario();
        let selection = AttractionSelection {
            category: Facet::All,
            park: Facet::Only("Itatiaia".into()),
        };
        assert!(apply(&collection, &selection, attraction_matches).is_empty());
    }

    #[test]
    fn test_record_without_park_only_matches_all() {
        let mut orphan = attraction(9, &["Natureza"], "x");
        orphan.park = None;
        assert!(attraction_matches(&orphan, &AttractionSelection::default()));
        let selection = AttractionSelection {
            category: Facet::All,
            park: Facet::Only("x".into()),
        };
        assert!(!attraction_matches(&orphan, &selection));
    }

    #[rstest]
    #[case("all", true)]
    #[case("1", false)]
    #[case("2", true)]
    #[case("3", false)]
    fn test_moderate_route_difficulty(#[case] input: &str, #[case] included: bool) {
        let mut moderate = route(1, Some(2), "Serra");
        moderate.difficulty_label = "Moderado".into();
        let selection = RouteSelection {
            difficulty: input.parse().unwrap(),
            park: Facet::All,
        };
        assert_eq!(route_matches(&moderate, &selection), included);
    }

    #[test]
    fn test_unrated_route_never_matches_a_level() {
        let unrated = route(1, Some(7), "Serra");
        for level in Difficulty::LEVELS {
            let selection = RouteSelection {
                difficulty: Facet::Only(level),
                park: Facet::All,
            };
            assert!(!route_matches(&unrated, &selection));
        }
    }

    #[rstest]
    #[case("all", Facet::All)]
    #[case("ALL", Facet::All)]
    #[case("Todas", Facet::All)]
    #[case("Natureza", Facet::Only("Natureza".to_string()))]
    fn test_parse_text_facet(#[case] input: &str, #[case] expected: Facet<String>) {
        assert_eq!(input.parse::<Facet<String>>().unwrap(), expected);
    }

    #[test]
    fn test_parse_difficulty_facet_rejects_unknown() {
        assert!("4".parse::<Facet<Difficulty>>().is_err());
        assert!("hard".parse::<Facet<Difficulty>>().is_err());
        assert_eq!(
            "3".parse::<Facet<Difficulty>>().unwrap(),
            Facet::Only(Difficulty::Hard)
        );
    }
}
