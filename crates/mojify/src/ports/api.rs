//! Mojify API Port
//!
//! Abstract interface for every remote operation the client performs.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    errors::DomainError, Agent, AgentRegistration, ClaimReceipt, LeaderboardEntry, MediaType,
    Prompt, PromptDetail, PromptStatus, SearchEntityType, SearchResults, SortMode, Stats,
    VoteReceipt, VoteValue, VoterFingerprint,
};

/// Filters for the prompt list. `None` fields are left off the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptQuery {
    pub status: Option<PromptStatus>,
    pub sort: Option<SortMode>,
}

impl PromptQuery {
    pub fn sorted(sort: SortMode) -> Self {
        Self {
            status: None,
            sort: Some(sort),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePromptRequest {
    pub title: String,
    pub context_text: String,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VoteRequest {
    pub value: VoteValue,
    pub user_fingerprint: VoterFingerprint,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegisterAgentRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<u32>,
    pub entity_type: Option<SearchEntityType>,
}

/// Remote Mojify API
///
/// Implementations normalize every failure into [`DomainError`]; callers
/// never see transport-specific error types.
#[async_trait]
pub trait MojifyApi: Send + Sync {
    /// `GET /api/prompts/`
    async fn list_prompts(&self, query: &PromptQuery) -> Result<Vec<Prompt>, DomainError>;

    /// `GET /api/prompts/{id}` with nested proposals
    async fn get_prompt(&self, prompt_id: &str) -> Result<PromptDetail, DomainError>;

    /// `POST /api/prompts/`
    async fn create_prompt(&self, request: &CreatePromptRequest) -> Result<Prompt, DomainError>;

    /// `POST /api/proposals/{id}/vote`
    ///
    /// The server upserts one vote per (fingerprint, proposal).
    async fn vote(
        &self,
        proposal_id: &str,
        request: &VoteRequest,
    ) -> Result<VoteReceipt, DomainError>;

    /// `GET /api/leaderboard/`
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError>;

    /// `GET /api/stats`
    async fn stats(&self) -> Result<Stats, DomainError>;

    /// `GET /api/search`
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, DomainError>;

    /// `GET /api/agents/`
    async fn list_agents(&self) -> Result<Vec<Agent>, DomainError>;

    /// `POST /api/agents/register`
    async fn register_agent(
        &self,
        request: &RegisterAgentRequest,
    ) -> Result<AgentRegistration, DomainError>;

    /// `GET /api/agents/skill`, raw markdown
    async fn skill(&self) -> Result<String, DomainError>;

    /// `POST /api/agents/claim/{token}`
    async fn claim_agent(&self, token: &str) -> Result<ClaimReceipt, DomainError>;
}
