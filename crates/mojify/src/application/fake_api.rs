//! In-memory `MojifyApi` used by the application service tests.
//!
//! Behaves like the real server where it matters to the client: votes are
//! upserted per (fingerprint, proposal) and tallies are recomputed on the
//! server side, agent names are unique, claim tokens are single-use.
//! Gates let a test hold a request open until it releases it.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::domain::{
    Agent, AgentRegistration, ApiKey, ClaimReceipt, DomainError, LeaderboardEntry, MediaType,
    Prompt, PromptDetail, PromptStatus, Proposal, SearchEntityType, SearchResult, SearchResults,
    SortMode, Stats, VoteReceipt, VoteValue,
};
use crate::ports::{
    CreatePromptRequest, MojifyApi, PromptQuery, RegisterAgentRequest, SearchQuery, VoteRequest,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ListPrompts(PromptQuery),
    GetPrompt(String),
    CreatePrompt(String),
    Vote(String, VoteValue),
    Leaderboard,
    Stats,
    Search(String),
    ListAgents,
    RegisterAgent(String),
    Skill,
    Claim(String),
}

#[derive(Default)]
struct FakeState {
    lists: HashMap<SortMode, Vec<String>>,
    details: HashMap<String, PromptDetail>,
    failing_details: HashSet<String>,
    fail_list: bool,
    fail_votes: bool,
    fail_leaderboard: bool,
    fail_agents: bool,
    ballots: HashMap<(String, String), i8>,
    leaderboard: Vec<LeaderboardEntry>,
    agents: Vec<Agent>,
    claim_tokens: HashMap<String, String>,
    next_id: u32,
    calls: Vec<Call>,
    vote_gate: Option<Arc<Semaphore>>,
    list_gates: HashMap<SortMode, Arc<Semaphore>>,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

pub(crate) fn ts(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub(crate) fn proposal(id: &str, votes: i64) -> Proposal {
    Proposal {
        id: id.to_string(),
        agent_id: format!("agent-{}", id),
        agent_name: format!("Agent {}", id),
        emoji_string: "🔥😂".to_string(),
        rationale: None,
        votes,
        created_at: ts(1),
    }
}

pub(crate) fn detail(id: &str, proposals: Vec<Proposal>) -> PromptDetail {
    PromptDetail {
        prompt: Prompt {
            id: id.to_string(),
            created_by: None,
            title: format!("Prompt {}", id),
            context_text: format!("Context for {}", id),
            media_type: MediaType::Text,
            media_url: None,
            status: PromptStatus::Open,
            proposal_count: proposals.len() as u32,
            created_at: ts(0),
        },
        proposals,
    }
}

pub(crate) fn entry(rank: u32, name: &str) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        agent_id: format!("agent-{}", name),
        agent_name: name.to_string(),
        wins: 20u32.saturating_sub(rank),
        proposals: 12,
        total_score: 100 - rank as i64 * 10,
        win_rate: "50%".to_string(),
    }
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    /// Register prompts and list them, in order, under `sort`
    pub(crate) fn seed(&self, sort: SortMode, prompts: Vec<PromptDetail>) {
        self.with_state(|s| {
            let ids = prompts.iter().map(|p| p.id().to_string()).collect();
            for p in prompts {
                s.details.insert(p.id().to_string(), p);
            }
            s.lists.insert(sort, ids);
        });
    }

    pub(crate) fn fail_detail(&self, prompt_id: &str) {
        self.with_state(|s| s.failing_details.insert(prompt_id.to_string()));
    }

    pub(crate) fn set_fail_list(&self, fail: bool) {
        self.with_state(|s| s.fail_list = fail);
    }

    pub(crate) fn set_fail_votes(&self, fail: bool) {
        self.with_state(|s| s.fail_votes = fail);
    }

    pub(crate) fn set_fail_leaderboard(&self, fail: bool) {
        self.with_state(|s| s.fail_leaderboard = fail);
    }

    pub(crate) fn set_fail_agents(&self, fail: bool) {
        self.with_state(|s| s.fail_agents = fail);
    }

    pub(crate) fn set_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        self.with_state(|s| s.leaderboard = entries);
    }

    /// Hold every vote until the returned semaphore gets permits
    pub(crate) fn gate_votes(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.with_state(|s| s.vote_gate = Some(gate.clone()));
        gate
    }

    /// Hold list requests for `sort` until the returned semaphore gets permits
    pub(crate) fn gate_list(&self, sort: SortMode) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.with_state(|s| s.list_gates.insert(sort, gate.clone()));
        gate
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.with_state(|s| s.calls.clone())
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.with_state(|s| s.calls.iter().filter(|c| pred(c)).count())
    }

    pub(crate) fn list_calls(&self) -> Vec<PromptQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ListPrompts(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn vote_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Vote(..)))
    }

    fn record(&self, call: Call) {
        self.with_state(|s| s.calls.push(call));
    }

    fn transport(msg: &str) -> DomainError {
        DomainError::Transport(msg.to_string())
    }
}

async fn pass(gate: Option<Arc<Semaphore>>) {
    if let Some(gate) = gate {
        gate.acquire().await.unwrap().forget();
    }
}

#[async_trait]
impl MojifyApi for FakeApi {
    async fn list_prompts(&self, query: &PromptQuery) -> Result<Vec<Prompt>, DomainError> {
        self.record(Call::ListPrompts(*query));
        let sort = query.sort.unwrap_or(SortMode::New);
        let gate = self.with_state(|s| s.list_gates.get(&sort).cloned());
        pass(gate).await;

        self.with_state(|s| {
            if s.fail_list {
                return Err(DomainError::Http {
                    status: 503,
                    detail: "Service Unavailable".to_string(),
                });
            }
            Ok(s.lists
                .get(&sort)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| s.details.get(id))
                        .map(|d| d.prompt.clone())
                        .collect()
                })
                .unwrap_or_default())
        })
    }

    async fn get_prompt(&self, prompt_id: &str) -> Result<PromptDetail, DomainError> {
        self.record(Call::GetPrompt(prompt_id.to_string()));
        tokio::task::yield_now().await;

        self.with_state(|s| {
            if s.failing_details.contains(prompt_id) {
                return Err(Self::transport("connection reset"));
            }
            s.details.get(prompt_id).cloned().ok_or(DomainError::Http {
                status: 404,
                detail: "Prompt not found.".to_string(),
            })
        })
    }

    async fn create_prompt(&self, request: &CreatePromptRequest) -> Result<Prompt, DomainError> {
        self.record(Call::CreatePrompt(request.title.clone()));
        self.with_state(|s| {
            s.next_id += 1;
            let id = format!("p-new-{}", s.next_id);
            let mut created = detail(&id, Vec::new());
            created.prompt.title = request.title.clone();
            created.prompt.context_text = request.context_text.clone();
            created.prompt.media_type = request.media_type;
            created.prompt.media_url = request.media_url.clone();
            s.lists.entry(SortMode::New).or_default().insert(0, id.clone());
            s.details.insert(id, created.clone());
            Ok(created.prompt)
        })
    }

    async fn vote(
        &self,
        proposal_id: &str,
        request: &VoteRequest,
    ) -> Result<VoteReceipt, DomainError> {
        self.record(Call::Vote(proposal_id.to_string(), request.value));
        let gate = self.with_state(|s| s.vote_gate.clone());
        pass(gate).await;

        self.with_state(|s| {
            if s.fail_votes {
                return Err(Self::transport("network unreachable"));
            }
            s.ballots.insert(
                (
                    proposal_id.to_string(),
                    request.user_fingerprint.as_str().to_string(),
                ),
                request.value.as_i8(),
            );
            let net: i64 = s
                .ballots
                .iter()
                .filter(|((pid, _), _)| pid == proposal_id)
                .map(|(_, v)| *v as i64)
                .sum();

            let mut found = false;
            for d in s.details.values_mut() {
                for p in d.proposals.iter_mut().filter(|p| p.id == proposal_id) {
                    p.votes = net;
                    found = true;
                }
            }
            if !found {
                return Err(DomainError::Http {
                    status: 404,
                    detail: "Proposal not found.".to_string(),
                });
            }
            Ok(VoteReceipt {
                proposal_id: proposal_id.to_string(),
                net_votes: net,
            })
        })
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        self.record(Call::Leaderboard);
        self.with_state(|s| {
            if s.fail_leaderboard {
                return Err(Self::transport("timed out"));
            }
            Ok(s.leaderboard.clone())
        })
    }

    async fn stats(&self) -> Result<Stats, DomainError> {
        self.record(Call::Stats);
        self.with_state(|s| {
            let voters: HashSet<&String> = s.ballots.keys().map(|(_, fp)| fp).collect();
            Ok(Stats {
                rounds: s.details.len() as u64,
                agents: s.agents.len() as u64,
                voters: voters.len() as u64,
            })
        })
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, DomainError> {
        self.record(Call::Search(query.q.clone()));
        self.with_state(|s| {
            let needle = query.q.to_lowercase();
            let mut results: Vec<SearchResult> = s
                .details
                .values()
                .filter(|d| d.prompt.title.to_lowercase().contains(&needle))
                .map(|d| SearchResult {
                    entity_type: SearchEntityType::Prompt,
                    entity_id: d.id().to_string(),
                    title: d.prompt.title.clone(),
                    snippet: Some(d.prompt.context_text.clone()),
                    score: 1.0,
                    prompt_id: None,
                })
                .collect();
            results.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
            if let Some(limit) = query.limit {
                results.truncate(limit as usize);
            }
            Ok(SearchResults {
                query: query.q.clone(),
                results,
            })
        })
    }

    async fn list_agents(&self) -> Result<Vec<Agent>, DomainError> {
        self.record(Call::ListAgents);
        self.with_state(|s| {
            if s.fail_agents {
                return Err(Self::transport("connection refused"));
            }
            Ok(s.agents.clone())
        })
    }

    async fn register_agent(
        &self,
        request: &RegisterAgentRequest,
    ) -> Result<AgentRegistration, DomainError> {
        self.record(Call::RegisterAgent(request.name.clone()));
        self.with_state(|s| {
            if s.agents.iter().any(|a| a.name == request.name) {
                return Err(DomainError::Http {
                    status: 409,
                    detail: "Agent name already taken.".to_string(),
                });
            }
            s.next_id += 1;
            let token = format!("mojify_claim_{}", s.next_id);
            let registration = AgentRegistration {
                id: format!("agent-{}", s.next_id),
                name: request.name.clone(),
                api_key: ApiKey::new(format!("key-{}", s.next_id)),
                created_at: ts(s.next_id as i64),
                claim_url: format!("http://localhost:5173/claim/{}", token),
                skill_md: "# Mojify Skill".to_string(),
            };
            s.claim_tokens.insert(token, request.name.clone());
            s.agents.insert(0, registration.agent());
            Ok(registration)
        })
    }

    async fn skill(&self) -> Result<String, DomainError> {
        self.record(Call::Skill);
        Ok("# Mojify Skill".to_string())
    }

    async fn claim_agent(&self, token: &str) -> Result<ClaimReceipt, DomainError> {
        self.record(Call::Claim(token.to_string()));
        self.with_state(|s| match s.claim_tokens.remove(token) {
            Some(agent_name) => Ok(ClaimReceipt {
                success: true,
                agent_name,
                message: "Agent claimed successfully.".to_string(),
            }),
            None => Err(DomainError::Http {
                status: 404,
                detail: "Invalid or expired claim link.".to_string(),
            }),
        })
    }
}
