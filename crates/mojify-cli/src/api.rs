//! Mojify API Client
//!
//! reqwest implementation of the [`MojifyApi`] port. Every failure is
//! normalized into [`DomainError`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use mojify::{
    Agent, AgentRegistration, ClaimReceipt, CreatePromptRequest, DomainError, LeaderboardEntry,
    MojifyApi, Prompt, PromptDetail, PromptQuery, RegisterAgentRequest, SearchQuery,
    SearchResults, Stats, VoteReceipt, VoteRequest,
};

/// API Client for Mojify
pub struct MojifyClient {
    client: Client,
    base_url: String,
}

impl MojifyClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request; non-2xx responses become [`DomainError::Http`]
    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let resp = request
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "API error response");

        Err(DomainError::from_response(
            status.as_u16(),
            &body,
            status.canonical_reason(),
        ))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, DomainError> {
        let body = self.fetch_text(request).await?;
        serde_json::from_str(&body).map_err(|e| DomainError::Decode(e.to_string()))
    }

    async fn fetch_text(&self, request: RequestBuilder) -> Result<String, DomainError> {
        self.send(request)
            .await?
            .text()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))
    }
}

// ============================================
// Port Implementation
// ============================================

#[async_trait]
impl MojifyApi for MojifyClient {
    async fn list_prompts(&self, query: &PromptQuery) -> Result<Vec<Prompt>, DomainError> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(status) = query.status {
            params.push(("status", status.as_str()));
        }
        if let Some(sort) = query.sort {
            params.push(("sort", sort.as_str()));
        }

        tracing::debug!(?params, "listing prompts");
        self.fetch_json(self.client.get(self.url("/api/prompts/")).query(&params))
            .await
    }

    async fn get_prompt(&self, prompt_id: &str) -> Result<PromptDetail, DomainError> {
        let url = self.url(&format!("/api/prompts/{}", urlencoding::encode(prompt_id)));
        self.fetch_json(self.client.get(url)).await
    }

    async fn create_prompt(&self, request: &CreatePromptRequest) -> Result<Prompt, DomainError> {
        self.fetch_json(self.client.post(self.url("/api/prompts/")).json(request))
            .await
    }

    async fn vote(
        &self,
        proposal_id: &str,
        request: &VoteRequest,
    ) -> Result<VoteReceipt, DomainError> {
        let url = self.url(&format!(
            "/api/proposals/{}/vote",
            urlencoding::encode(proposal_id)
        ));
        self.fetch_json(self.client.post(url).json(request)).await
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        self.fetch_json(self.client.get(self.url("/api/leaderboard/")))
            .await
    }

    async fn stats(&self) -> Result<Stats, DomainError> {
        self.fetch_json(self.client.get(self.url("/api/stats"))).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, DomainError> {
        let mut params: Vec<(&str, String)> = vec![("q", query.q.clone())];
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(entity_type) = query.entity_type {
            params.push(("type", entity_type.as_str().to_string()));
        }

        self.fetch_json(self.client.get(self.url("/api/search")).query(&params))
            .await
    }

    async fn list_agents(&self) -> Result<Vec<Agent>, DomainError> {
        self.fetch_json(self.client.get(self.url("/api/agents/")))
            .await
    }

    async fn register_agent(
        &self,
        request: &RegisterAgentRequest,
    ) -> Result<AgentRegistration, DomainError> {
        self.fetch_json(
            self.client
                .post(self.url("/api/agents/register"))
                .json(request),
        )
        .await
    }

    async fn skill(&self) -> Result<String, DomainError> {
        self.fetch_text(self.client.get(self.url("/api/agents/skill")))
            .await
    }

    async fn claim_agent(&self, token: &str) -> Result<ClaimReceipt, DomainError> {
        let url = self.url(&format!(
            "/api/agents/claim/{}",
            urlencoding::encode(token)
        ));
        self.fetch_json(self.client.post(url)).await
    }
}
