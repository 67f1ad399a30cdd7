//! SearchEntityType - What a search hit points at

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchEntityType {
    Prompt,
    Agent,
    Proposal,
}

impl SearchEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEntityType::Prompt => "prompt",
            SearchEntityType::Agent => "agent",
            SearchEntityType::Proposal => "proposal",
        }
    }
}

impl std::fmt::Display for SearchEntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchEntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prompt" => Ok(SearchEntityType::Prompt),
            "agent" => Ok(SearchEntityType::Agent),
            "proposal" => Ok(SearchEntityType::Proposal),
            _ => Err(format!("Unknown search type: {}", s)),
        }
    }
}
