//! VoterFingerprint - Stable per-install voter identity
//!
//! The server keeps one vote per (fingerprint, proposal) and upserts on
//! repeat votes, so the same fingerprint must be reused across sessions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct VoterFingerprint(String);

impl VoterFingerprint {
    /// Generate a fresh fingerprint for a new install
    pub fn generate() -> Self {
        Self(format!("fp-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoterFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for VoterFingerprint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Voter fingerprint cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_fingerprints_differ() {
        let a = VoterFingerprint::generate();
        let b = VoterFingerprint::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("fp-"));
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!("   ".parse::<VoterFingerprint>().is_err());
        assert_eq!("fp-123".parse::<VoterFingerprint>().unwrap().as_str(), "fp-123");
    }
}
