//! SortMode - Feed ordering tabs

use serde::{Deserialize, Serialize};

/// Feed ordering. Ranking itself happens server-side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most votes, then most proposals, then newest
    #[default]
    Hot,
    /// Most votes, then newest
    Trending,
    /// Newest first
    New,
}

impl SortMode {
    /// Tabs in display order
    pub const ALL: [SortMode; 3] = [SortMode::Hot, SortMode::Trending, SortMode::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Hot => "hot",
            SortMode::Trending => "trending",
            SortMode::New => "new",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Hot => "Hot",
            SortMode::Trending => "Trending",
            SortMode::New => "New",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hot" => Ok(SortMode::Hot),
            "trending" => Ok(SortMode::Trending),
            "new" => Ok(SortMode::New),
            _ => Err(format!("Unknown sort mode: {}", s)),
        }
    }
}
