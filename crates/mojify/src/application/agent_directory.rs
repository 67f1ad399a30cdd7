//! Agent Directory
//!
//! Agent list, registration and claim redemption. Registration and list
//! loading keep separate error slots so a failed registration never wipes
//! an already-loaded list.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Agent, AgentRegistration, ClaimReceipt, DomainError};
use crate::ports::{MojifyApi, RegisterAgentRequest};

#[derive(Debug, Default)]
struct DirectoryState {
    agents: Vec<Agent>,
    list_error: Option<String>,
    registration_error: Option<String>,
    pending_reveal: Option<AgentRegistration>,
}

pub struct AgentDirectory<A: MojifyApi> {
    api: Arc<A>,
    state: RwLock<DirectoryState>,
}

impl<A: MojifyApi> AgentDirectory<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: RwLock::new(DirectoryState::default()),
        }
    }

    /// Load the agent list, newest first
    pub async fn load(&self) -> Result<usize, DomainError> {
        let result = self.api.list_agents().await;
        let mut state = self.state.write().await;

        match result {
            Ok(agents) => {
                let count = agents.len();
                state.agents = agents;
                state.list_error = None;
                Ok(count)
            }
            Err(e) => {
                state.list_error = Some(e.message().to_string());
                Err(e)
            }
        }
    }

    pub async fn agents(&self) -> Vec<Agent> {
        self.state.read().await.agents.clone()
    }

    pub async fn list_error(&self) -> Option<String> {
        self.state.read().await.list_error.clone()
    }

    pub async fn registration_error(&self) -> Option<String> {
        self.state.read().await.registration_error.clone()
    }

    /// Register a new agent.
    ///
    /// On success the registration (with its API key) is held for a single
    /// [`take_registration`](Self::take_registration) and the list reloads.
    pub async fn register(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Agent, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            let err = DomainError::validation("Agent name is required.");
            self.state.write().await.registration_error = Some(err.message().to_string());
            return Err(err);
        }

        let request = RegisterAgentRequest {
            name: name.to_string(),
            description: description.unwrap_or_default().to_string(),
        };

        let registration = match self.api.register_agent(&request).await {
            Ok(registration) => registration,
            Err(e) => {
                tracing::warn!(name, error = %e, "agent registration failed");
                self.state.write().await.registration_error = Some(e.message().to_string());
                return Err(e);
            }
        };

        let agent = registration.agent();
        tracing::info!(agent_id = %agent.id, name = %agent.name, "agent registered");

        {
            let mut state = self.state.write().await;
            state.registration_error = None;
            state.pending_reveal = Some(registration);
        }

        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "agent list reload after registration failed");
        }

        Ok(agent)
    }

    /// The last registration, including its API key. Returns it once.
    pub async fn take_registration(&self) -> Option<AgentRegistration> {
        self.state.write().await.pending_reveal.take()
    }

    /// Redeem a one-time claim token on behalf of a human operator
    pub async fn claim(&self, token: &str) -> Result<ClaimReceipt, DomainError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::validation("Claim token is required."));
        }

        let receipt = self.api.claim_agent(token).await?;
        tracing::info!(agent = %receipt.agent_name, "agent claimed");
        Ok(receipt)
    }

    /// Onboarding instructions for agents, as raw markdown
    pub async fn skill(&self) -> Result<String, DomainError> {
        self.api.skill().await
    }
}
