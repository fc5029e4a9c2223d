//! Raw record normalization
//!
//! Turns wire records into canonical entities. Synonym fields are resolved
//! by explicit ordered-fallback functions so each rule is testable on its own.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AssetDefaults;
use crate::models::{
    ActivityType, Attraction, Coordinates, Difficulty, ImageRef, Length, Park, RawAttraction,
    RawPark, RawRoute, Route, RouteStatus,
};
use crate::{CatalogError, Result};

/// First candidate that is present and not blank
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Event date or schedule: `data` wins over `horario`
#[must_use]
pub fn resolve_schedule(raw: &RawAttraction) -> Option<String> {
    first_non_empty([raw.data.as_deref(), raw.horario.as_deref()]).map(str::to_string)
}

/// Location: `local`, then `localizacao`, then the park's own location
#[must_use]
pub fn resolve_location(raw: &RawAttraction, park: Option<&Park>) -> Option<String> {
    first_non_empty([
        raw.local.as_deref(),
        raw.localizacao.as_deref(),
        park.map(|p| p.location.as_str()),
    ])
    .map(str::to_string)
}

#[must_use]
pub fn resolve_image(raw: Option<&str>, placeholder: &str) -> ImageRef {
    match first_non_empty([raw]) {
        Some(url) => ImageRef::Provided(url.to_string()),
        None => ImageRef::Placeholder(placeholder.to_string()),
    }
}

/// A park without id or name cannot be grouped on, so it is dropped
#[must_use]
pub fn normalize_park(raw: RawPark) -> Option<Park> {
    let (Some(id), Some(name)) = (raw.id, raw.nome.filter(|n| !n.trim().is_empty())) else {
        debug!("Embedded park lacks id or name, treating it as absent");
        return None;
    };
    Some(Park {
        id,
        name,
        description: raw.descricao.unwrap_or_default(),
        location: raw.localizacao.unwrap_or_default(),
    })
}

pub fn normalize_attraction(raw: RawAttraction, assets: &AssetDefaults) -> Result<Attraction> {
    let id = raw
        .id
        .ok_or_else(|| CatalogError::malformed("attraction", "missing id"))?;
    let title = first_non_empty([raw.titulo.as_deref()])
        .ok_or_else(|| CatalogError::malformed("attraction", format!("{id} has no titulo")))?
        .to_string();

    let park = raw.parque.clone().and_then(normalize_park);
    let schedule = resolve_schedule(&raw);
    let location = resolve_location(&raw, park.as_ref());
    let image = resolve_image(raw.imagem_url.as_deref(), &assets.attraction_placeholder);
    let contact = first_non_empty([raw.contato.as_deref()]).map(str::to_string);
    let coordinates = match (raw.latitude.as_deref(), raw.longitude.as_deref()) {
        (Some(lat), Some(lon)) => Coordinates::parse(lat, lon),
        _ => None,
    };

    Ok(Attraction {
        id,
        title,
        description: raw.descricao.unwrap_or_default(),
        image,
        park,
        tags: raw.tags.unwrap_or_default(),
        schedule,
        location,
        contact,
        coordinates,
    })
}

pub fn normalize_route(raw: RawRoute, assets: &AssetDefaults) -> Result<Route> {
    let id = raw
        .id
        .ok_or_else(|| CatalogError::malformed("route", "missing id"))?;
    let name = first_non_empty([raw.nome.as_deref()])
        .ok_or_else(|| CatalogError::malformed("route", format!("{id} has no nome")))?
        .to_string();

    let difficulty = Difficulty::from_level(raw.dificuldade);
    if difficulty == Difficulty::Unrated {
        debug!(route = id, level = ?raw.dificuldade, "Unrecognized difficulty level");
    }

    let length = Length::new(raw.extensao_km.unwrap_or_default());
    if length.km().is_none() {
        debug!(route = id, length = length.as_text(), "Route length is unknown");
    }

    Ok(Route {
        id,
        name,
        length,
        difficulty,
        difficulty_label: raw.dificuldade_nome.unwrap_or_default(),
        status: RouteStatus::from_raw(raw.status.as_deref()),
        park: raw.parque.and_then(normalize_park),
        image: resolve_image(raw.imagem_url.as_deref(), &assets.route_placeholder),
        description: first_non_empty([raw.descricao.as_deref()]).map(str::to_string),
        duration: first_non_empty([raw.duracao.as_deref()]).map(str::to_string),
        elevation_gain: raw
            .elevacao
            .filter(|m| *m > 0)
            .and_then(|m| u32::try_from(m).ok()),
        activity: ActivityType::from_raw(raw.tipo.as_deref()),
        highlights: raw.destaques.unwrap_or_default(),
    })
}

/// Normalizes a fetched JSON array, skipping records that fail to
/// deserialize or lack a required field.
pub fn normalize_records<R, E, F>(values: Vec<Value>, mut normalize: F) -> Vec<E>
where
    R: DeserializeOwned,
    F: FnMut(R) -> Result<E>,
{
    let total = values.len();
    let entities: Vec<E> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let outcome = serde_json::from_value::<R>(value)
                .map_err(|e| CatalogError::parse(e.to_string()))
                .and_then(&mut normalize);
            match outcome {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!(index, "Skipping record: {}", e);
                    None
                }
            }
        })
        .collect();

    if entities.len() < total {
        warn!(
            "Kept {} of {} records after normalization",
            entities.len(),
            total
        );
    }
    entities
}
