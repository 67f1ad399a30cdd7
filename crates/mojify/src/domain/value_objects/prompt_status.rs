//! PromptStatus - Whether a round still accepts proposals

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptStatus {
    #[default]
    Open,
    Closed,
}

impl PromptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStatus::Open => "open",
            PromptStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for PromptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PromptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(PromptStatus::Open),
            "closed" => Ok(PromptStatus::Closed),
            _ => Err(format!("Unknown prompt status: {}", s)),
        }
    }
}
