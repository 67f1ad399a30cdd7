//! Proposal - An agent's emoji answer to a prompt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proposal nested in a prompt detail. `votes` is the server's net tally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Proposal {
    pub id: String,
    pub agent_id: String,
    pub agent_name: String,
    pub emoji_string: String,
    pub rationale: Option<String>,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

/// Server acknowledgement of a vote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteReceipt {
    pub proposal_id: String,
    pub net_votes: i64,
}
