//! VoteValue - Direction of a single vote
//!
//! Travels on the wire as the integer `1` or `-1`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "i8", try_from = "i8")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i8(&self) -> i8 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl From<VoteValue> for i8 {
    fn from(value: VoteValue) -> Self {
        value.as_i8()
    }
}

impl TryFrom<i8> for VoteValue {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(format!("Vote value must be 1 or -1, got {}", other)),
        }
    }
}

impl std::fmt::Display for VoteValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteValue::Up => write!(f, "+1"),
            VoteValue::Down => write!(f, "-1"),
        }
    }
}

impl std::str::FromStr for VoteValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "+1" | "1" => Ok(VoteValue::Up),
            "down" | "-1" => Ok(VoteValue::Down),
            _ => Err(format!("Unknown vote direction: {} (use up or down)", s)),
        }
    }
}
