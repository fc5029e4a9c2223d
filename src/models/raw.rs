//! Wire records as the catalog API sends them
//!
//! Every field is optional here; required-ness is enforced by the
//! normalizer so one bad record cannot fail a whole collection.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPark {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub localizacao: Option<String>,
}

/// Attraction (event) record. Two schema generations coexist: `data`/`local`
/// and `horario`/`localizacao`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAttraction {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub imagem_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_park")]
    pub parque: Option<RawPark>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub data: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub horario: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub local: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub localizacao: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contato: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub longitude: Option<String>,
}

/// Route (trail) record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoute {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nome: Option<String>,
    /// Decimal serialized as text ("12.50") to keep its formatting
    #[serde(default, deserialize_with = "lenient_text")]
    pub extensao_km: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub dificuldade: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dificuldade_nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_park")]
    pub parque: Option<RawPark>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub imagem_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duracao: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub elevacao: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub destaques: Option<Vec<String>>,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts a JSON string or number and keeps it as text; anything else is `None`
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

/// A list of strings. Non-text entries are dropped and a bare string is a
/// one-element list; any other shape is `None`.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar_text).collect()),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(vec![s]),
        _ => None,
    })
}

/// Only an embedded object is a park; a bare id or any other shape is `None`
fn lenient_park<'de, D>(deserializer: D) -> Result<Option<RawPark>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => RawPark::deserialize(value).ok(),
        _ => None,
    })
}

/// Accepts an integer or an integer-looking string; anything else is `None`
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_i64(deserializer)?.and_then(|n| u64::try_from(n).ok()))
}
