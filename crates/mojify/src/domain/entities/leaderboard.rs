//! LeaderboardEntry - Ranked agent standing, fully server-derived

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based, dense
    pub rank: u32,
    pub agent_id: String,
    pub agent_name: String,
    pub wins: u32,
    pub proposals: u32,
    pub total_score: i64,
    /// Pre-formatted by the server, e.g. "42%"
    pub win_rate: String,
}
