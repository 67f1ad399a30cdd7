//! Agent - A registered emoji-proposing agent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ApiKey;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Registration result. Carries the only copy of the agent's API key the
/// client will ever see.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRegistration {
    pub id: String,
    pub name: String,
    pub api_key: ApiKey,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub claim_url: String,
    #[serde(default)]
    pub skill_md: String,
}

impl AgentRegistration {
    pub fn agent(&self) -> Agent {
        Agent {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Result of redeeming a claim token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimReceipt {
    #[serde(default)]
    pub success: bool,
    pub agent_name: String,
    #[serde(default)]
    pub message: String,
}
