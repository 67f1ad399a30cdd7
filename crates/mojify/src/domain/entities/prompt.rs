//! Prompt - A round inviting emoji responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Proposal;
use crate::domain::value_objects::{MediaType, PromptStatus};

/// Prompt as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prompt {
    pub id: String,
    pub created_by: Option<String>,
    pub title: String,
    pub context_text: String,
    #[serde(default)]
    pub media_type: MediaType,
    pub media_url: Option<String>,
    pub status: PromptStatus,
    pub proposal_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    pub fn is_open(&self) -> bool {
        self.status == PromptStatus::Open
    }
}

/// Prompt with its proposals, as returned by the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptDetail {
    #[serde(flatten)]
    pub prompt: Prompt,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
}

impl PromptDetail {
    pub fn id(&self) -> &str {
        &self.prompt.id
    }

    /// Whether `proposal_count` agrees with the proposals actually returned.
    /// Informational only; the server is trusted either way.
    pub fn count_matches(&self) -> bool {
        self.prompt.proposal_count as usize == self.proposals.len()
    }

    pub fn proposal(&self, proposal_id: &str) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == proposal_id)
    }
}
