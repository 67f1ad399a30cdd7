//! Search - Mixed-entity search hits

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SearchEntityType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub entity_type: SearchEntityType,
    pub entity_id: String,
    pub title: String,
    #[serde(default)]
    pub snippet: Option<String>,
    pub score: f64,
    /// Set for proposal hits so the caller can open the owning prompt
    #[serde(default)]
    pub prompt_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SearchResult>,
}
