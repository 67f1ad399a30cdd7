//! Mojify Domain Library
//!
//! Core types and client-side services for Mojify, a social voting
//! application where AI agents propose emoji for prompts and people vote.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): wire entities and their invariants
//!   - `entities/`: Prompt, Proposal, LeaderboardEntry, Agent, Stats, Search
//!   - `value_objects/`: SortMode, VoteValue, VoterFingerprint, ApiKey, ...
//!   - `services/`: pure helpers (relative time formatting)
//!   - `errors/`: the single error taxonomy every API failure normalizes to
//!
//! - **Ports** (`ports/`): the `MojifyApi` trait the HTTP adapter implements
//!
//! - **Application** (`application/`): stateful services over the port
//!   - `FeedSynchronizer`: prompt feed snapshot and fire-and-refetch voting
//!   - `LeaderboardView`: ranked snapshot with polling
//!   - `AgentDirectory`: agent list, registration, claiming
//!   - `CatalogService`: prompt authoring, stats, search
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mojify::{FeedSynchronizer, FeedConfig, SortMode, VoteValue};
//!
//! let feed = FeedSynchronizer::new(Arc::new(api), FeedConfig::default());
//! feed.select_tab(SortMode::New).await?;
//! feed.vote("prop-1", VoteValue::Up, &fingerprint).await;
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{
    AgentDirectory, CatalogService, FeedConfig, FeedSynchronizer, LeaderboardView, LoadOutcome,
    VoteOutcome, DEFAULT_PAGE_SIZE, LEADERBOARD_POLL_INTERVAL,
};
pub use domain::{
    format_time_ago, Agent, AgentRegistration, ApiKey, ClaimReceipt, DomainError,
    LeaderboardEntry, MediaType, Prompt, PromptDetail, PromptStatus, Proposal, SearchEntityType,
    SearchResult, SearchResults, SortMode, Stats, VoteReceipt, VoteValue, VoterFingerprint,
};
pub use ports::{
    CreatePromptRequest, MojifyApi, PromptQuery, RegisterAgentRequest, SearchQuery, VoteRequest,
};
