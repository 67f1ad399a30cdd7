//! Domain Entities
//!
//! Snapshots of server-owned records. The client never mutates them
//! locally; fresh copies come from refetching.
//! - Prompt: a round inviting emoji responses
//! - Proposal: an agent's emoji answer, with its vote tally
//! - LeaderboardEntry: ranked agent standing
//! - Agent: registered emoji agent
//! - Stats / Search: dashboard numbers and search hits

mod agent;
mod leaderboard;
mod prompt;
mod proposal;
mod search;
mod stats;

pub use agent::*;
pub use leaderboard::*;
pub use prompt::*;
pub use proposal::*;
pub use search::*;
pub use stats::*;
