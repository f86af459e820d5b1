use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw ballot value. The wire shape depends on the proposal's voting
/// method:
///
/// - single-choice/basic: a 1-based choice index;
/// - approval/ranked-choice: a list of 1-based indices (ranked order is the
///   voter's preference order);
/// - quadratic/weighted: an object mapping 1-based index (as a JSON string
///   key) to a non-negative weight.
///
/// `Empty` absorbs `null` and missing values, and `Other` any remaining
/// malformed shape, so one corrupt ballot can never abort deserialization of
/// a vote list. Both are inert: they contribute nothing to a tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Single(u64),
    Multiple(Vec<u64>),
    Weighted(BTreeMap<String, f64>),
    Empty,
    Other(serde_json::Value),
}

impl Default for Choice {
    fn default() -> Self {
        Choice::Empty
    }
}

impl Choice {
    /// Build a weighted choice from 1-based `(index, weight)` pairs
    pub fn weighted<I: IntoIterator<Item = (u64, f64)>>(entries: I) -> Self {
        Choice::Weighted(
            entries
                .into_iter()
                .map(|(idx, w)| (idx.to_string(), w))
                .collect(),
        )
    }

    /// The single selected index, if this is a single-index ballot
    pub fn as_single(&self) -> Option<u64> {
        match self {
            Choice::Single(idx) => Some(*idx),
            _ => None,
        }
    }

    /// The selected index list, if this is a multi-index ballot
    pub fn as_indices(&self) -> Option<&[u64]> {
        match self {
            Choice::Multiple(indices) => Some(indices),
            _ => None,
        }
    }

    /// Weighted entries as 1-based `(index, weight)` pairs.
    ///
    /// Keys that do not parse as indices and negative weights are skipped
    /// rather than treated as errors.
    pub fn weight_entries(&self) -> Vec<(u64, f64)> {
        match self {
            Choice::Weighted(weights) => weights
                .iter()
                .filter_map(|(key, w)| {
                    let idx = key.parse::<u64>().ok()?;
                    (w.is_finite() && *w >= 0.0).then_some((idx, *w))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A voter's ballot on one proposal, scored at the proposal's snapshot
/// height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    /// Voter address; one vote per (proposal, voter), enforced hub-side
    pub voter: String,
    #[serde(default)]
    pub choice: Choice,
    /// Per-strategy contributions, parallel to the proposal's strategies
    #[serde(default)]
    pub scores: Vec<f64>,
    /// Total voting power, the sum of `scores`
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub created: i64,
}

impl Vote {
    /// Whether `balance` agrees with `sum(scores)` within `eps`
    pub fn balance_consistent(&self, eps: f64) -> bool {
        let total: f64 = self.scores.iter().sum();
        (total - self.balance).abs() <= eps
    }
}
