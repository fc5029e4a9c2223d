//! Catalog data sources
//!
//! The view only sees the `CatalogSource` trait; `HttpCatalogSource` is the
//! production implementation over the REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use super::EntityKind;
use crate::config::ApiConfig;
use crate::{CatalogError, Result};

/// Anything able to hand back the raw JSON records of one collection
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, kind: EntityKind) -> Result<Vec<Value>>;
}

/// REST client: one GET per collection, no query parameters
pub struct HttpCatalogSource {
    client: Client,
    api: ApiConfig,
}

impl HttpCatalogSource {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds.into()))
            .user_agent(concat!("tereverde/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api: api.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self, kind: EntityKind) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            kind.endpoint_path(&self.api).trim_start_matches('/')
        )
    }
}

/// A JSON array is the collection; `null` is an empty one
pub fn records_from_body(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Null => Ok(Vec::new()),
        other => Err(CatalogError::parse(format!(
            "Expected a JSON array of records, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    #[instrument(name = "fetch_catalog", skip(self, kind), fields(kind = %kind))]
    async fn fetch(&self, kind: EntityKind) -> Result<Vec<Value>> {
        let url = self.endpoint(kind);
        info!("Fetching {} from {}", kind, url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::network(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::status(status.as_u16(), url));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::parse(format!("Invalid JSON from {url}: {e}")))?;
        let records = records_from_body(body)?;

        debug!(
            "Fetched {} raw {} records in {:.3}s",
            records.len(),
            kind,
            start_time.elapsed().as_secs_f64()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_joining() {
        let mut api = ApiConfig::default();
        api.base_url = "http://localhost:8000/api/".to_string();
        api.routes_path = "/trilhas".to_string();
        let source = HttpCatalogSource::new(&api).unwrap();

        assert_eq!(source.endpoint(EntityKind::Routes), "http://localhost:8000/api/trilhas");
        assert_eq!(
            source.endpoint(EntityKind::Attractions),
            "http://localhost:8000/api/eventos"
        );
    }

    #[test]
    fn test_records_from_body() {
        assert_eq!(records_from_body(json!([{"id": 1}])).unwrap().len(), 1);
        assert!(records_from_body(Value::Null).unwrap().is_empty());

        let err = records_from_body(json!({"results": []})).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("an object"));
    }
}
