//! Park model: the parent entity attractions and routes embed

use serde::{Deserialize, Serialize};

/// Park snapshot embedded in an attraction or route record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Park {
    pub id: u64,
    /// Display name, also the park facet value
    pub name: String,
    pub description: String,
    pub location: String,
}

impl Park {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            location: location.into(),
        }
    }
}
