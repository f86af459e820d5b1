use chrono::Utc;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::types::space::{ScoringStrategy, Space};
use crate::voting::VotingMethod;

/// The block height voting power is measured at.
///
/// The hub serves this as a numeric string, the score API accepts a number or
/// the literal `"latest"`; both shapes round-trip here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Block(u64),
}

impl Default for BlockTag {
    fn default() -> Self {
        BlockTag::Latest
    }
}

impl std::fmt::Display for BlockTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockTag::Latest => write!(f, "latest"),
            BlockTag::Block(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockTag::Latest => serializer.serialize_str("latest"),
            BlockTag::Block(n) => serializer.serialize_u64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) if s == "latest" => Ok(BlockTag::Latest),
            serde_json::Value::String(s) => s
                .parse::<u64>()
                .map(BlockTag::Block)
                .map_err(|_| de::Error::custom(format!("invalid block tag '{}'", s))),
            serde_json::Value::Number(n) => n
                .as_u64()
                .map(BlockTag::Block)
                .ok_or_else(|| de::Error::custom(format!("invalid block number {}", n))),
            other => Err(de::Error::custom(format!(
                "expected block number or \"latest\", got {}",
                other
            ))),
        }
    }
}

/// Proposal lifecycle state, derived from the voting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalState {
    Pending,
    Active,
    Closed,
}

impl std::fmt::Display for ProposalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProposalState::Pending => write!(f, "pending"),
            ProposalState::Active => write!(f, "active"),
            ProposalState::Closed => write!(f, "closed"),
        }
    }
}

/// Minimal space reference embedded in hub proposal payloads.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SpaceRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A single vote-able question with choices, a voting window and a snapshot
/// block height.
///
/// Immutable once created; only the derived [`ProposalState`] changes as the
/// wall clock passes `start` and `end`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Proposal {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceRef>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Selects the tabulation strategy
    #[serde(rename = "type")]
    pub voting_method: VotingMethod,
    /// Ordered choice labels; ballots reference them with 1-based indices
    pub choices: Vec<String>,
    /// Voting window open, unix seconds
    #[serde(default)]
    pub start: i64,
    /// Voting window close, unix seconds
    #[serde(default)]
    pub end: i64,
    #[serde(default)]
    pub snapshot: BlockTag,
    /// Scoring strategies; empty means "inherit from the owning space"
    #[serde(default)]
    pub strategies: Vec<ScoringStrategy>,
    #[serde(default)]
    pub author: String,
    /// Precomputed aggregates from the hub, for quick preview before a full
    /// client-side tally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
}

impl Proposal {
    /// Lifecycle state at the given unix timestamp
    pub fn state_at(&self, now: i64) -> ProposalState {
        if now < self.start {
            ProposalState::Pending
        } else if now < self.end {
            ProposalState::Active
        } else {
            ProposalState::Closed
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ProposalState {
        self.state_at(Utc::now().timestamp())
    }

    /// The strategies that score this proposal's voters: the proposal's own
    /// if it carries any, otherwise the space defaults.
    pub fn effective_strategies<'a>(&'a self, space: &'a Space) -> &'a [ScoringStrategy] {
        if self.strategies.is_empty() {
            &space.strategies
        } else {
            &self.strategies
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_tag_shapes() {
        let latest: BlockTag = serde_json::from_value(json!("latest")).unwrap();
        assert_eq!(latest, BlockTag::Latest);

        let from_string: BlockTag = serde_json::from_value(json!("17945000")).unwrap();
        assert_eq!(from_string, BlockTag::Block(17_945_000));

        let from_number: BlockTag = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(from_number, BlockTag::Block(42));

        assert!(serde_json::from_value::<BlockTag>(json!("soon")).is_err());
    }

    #[test]
    fn test_proposal_state_window() {
        let proposal: Proposal = serde_json::from_value(json!({
            "id": "0xabc",
            "type": "single-choice",
            "choices": ["Yes", "No"],
            "start": 100,
            "end": 200,
            "snapshot": "123"
        }))
        .unwrap();

        assert_eq!(proposal.state_at(50), ProposalState::Pending);
        assert_eq!(proposal.state_at(150), ProposalState::Active);
        assert_eq!(proposal.state_at(200), ProposalState::Closed);
    }

    #[test]
    fn test_effective_strategies_inheritance() {
        let space: Space = serde_json::from_value(json!({
            "id": "yam.eth",
            "network": "1",
            "strategies": [{ "name": "erc20-balance-of" }]
        }))
        .unwrap();

        // No strategies of its own: inherit the space defaults
        let mut proposal: Proposal = serde_json::from_value(json!({
            "id": "0xabc",
            "type": "single-choice",
            "choices": ["A"],
            "snapshot": 1
        }))
        .unwrap();
        assert_eq!(proposal.effective_strategies(&space).len(), 1);
        assert_eq!(proposal.effective_strategies(&space)[0].name, "erc20-balance-of");

        // Its own strategies take precedence over the space's
        proposal.strategies = vec![
            ScoringStrategy::new("delegation"),
            ScoringStrategy::new("whitelist"),
        ];
        assert_eq!(proposal.effective_strategies(&space).len(), 2);
        assert_eq!(proposal.effective_strategies(&space)[0].name, "delegation");
    }

    #[test]
    fn test_unknown_voting_method_rejected() {
        let result = serde_json::from_value::<Proposal>(json!({
            "id": "0xabc",
            "type": "cumulative",
            "choices": ["A"],
            "snapshot": 1
        }));
        assert!(result.is_err());
    }
}
