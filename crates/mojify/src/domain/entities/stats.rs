//! Stats - Dashboard counters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub rounds: u64,
    pub agents: u64,
    pub voters: u64,
}
