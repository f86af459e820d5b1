//! Vote tabulation engine
//!
//! One stateless strategy per voting method interprets raw ballot [`Choice`]
//! values; [`results::compute_results`] drives them to aggregate weighted
//! ballots into per-choice tallies. The method set is a closed enum, so
//! dispatch is exhaustive at compile time and an unknown wire string is
//! rejected at the parse boundary with [`UnsupportedVotingMethod`] instead of
//! failing mid-tally.
//!
//! Everything in this module is synchronous and pure: no I/O, no shared
//! state, safe to call concurrently.

pub mod approval;
pub mod quadratic;
pub mod ranked_choice;
pub mod results;
pub mod single_choice;
pub mod weighted;

use serde::{Deserialize, Serialize};

use crate::errors::UnsupportedVotingMethod;
use crate::types::{Choice, Proposal};

/// The rule for interpreting and aggregating ballots.
///
/// `Basic` is a fixed For/Against/Abstain question and tallies exactly like
/// `SingleChoice`; the two stay distinct so the wire string round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VotingMethod {
    #[serde(rename = "single-choice")]
    SingleChoice,
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "approval")]
    Approval,
    #[serde(rename = "quadratic")]
    Quadratic,
    #[serde(rename = "ranked-choice")]
    RankedChoice,
    #[serde(rename = "weighted")]
    Weighted,
}

impl VotingMethod {
    /// The wire string for this method
    pub fn as_str(&self) -> &'static str {
        match self {
            VotingMethod::SingleChoice => "single-choice",
            VotingMethod::Basic => "basic",
            VotingMethod::Approval => "approval",
            VotingMethod::Quadratic => "quadratic",
            VotingMethod::RankedChoice => "ranked-choice",
            VotingMethod::Weighted => "weighted",
        }
    }

    pub(crate) fn strategy(&self) -> &'static dyn VotingStrategy {
        match self {
            VotingMethod::SingleChoice | VotingMethod::Basic => &single_choice::SingleChoiceVoting,
            VotingMethod::Approval => &approval::ApprovalVoting,
            VotingMethod::Quadratic => &quadratic::QuadraticVoting,
            VotingMethod::RankedChoice => &ranked_choice::RankedChoiceVoting,
            VotingMethod::Weighted => &weighted::WeightedVoting,
        }
    }
}

impl std::fmt::Display for VotingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VotingMethod {
    type Err = UnsupportedVotingMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-choice" => Ok(VotingMethod::SingleChoice),
            "basic" => Ok(VotingMethod::Basic),
            "approval" => Ok(VotingMethod::Approval),
            "quadratic" => Ok(VotingMethod::Quadratic),
            "ranked-choice" => Ok(VotingMethod::RankedChoice),
            "weighted" => Ok(VotingMethod::Weighted),
            other => Err(UnsupportedVotingMethod::new(other)),
        }
    }
}

/// Per-method ballot interpretation.
///
/// `vote_split` is the single primitive both tallies build on: the 0-based
/// choice indices a ballot touches and the fraction of the voter's power each
/// receives. A malformed or out-of-range ballot yields an empty split, so it
/// contributes zero everywhere and can never abort a tally.
pub(crate) trait VotingStrategy: Sync {
    /// Split a ballot into `(choice_index, fraction)` contributions
    fn vote_split(&self, num_choices: usize, choice: &Choice) -> Vec<(usize, f64)>;

    /// Render a ballot as display text; malformed ballots render as `""`
    fn choice_label(&self, choices: &[String], choice: &Choice) -> String;
}

/// Render a ballot as display text under the proposal's voting method.
///
/// Idempotent and side-effect-free; malformed or out-of-range ballots render
/// as an empty string, never a panic.
pub fn choice_string(proposal: &Proposal, choice: &Choice) -> String {
    proposal
        .voting_method
        .strategy()
        .choice_label(&proposal.choices, choice)
}

/// Resolve a 1-based ballot index against the choice count.
///
/// Index 0 and indices past the last choice are rejected.
pub(crate) fn resolve_index(num_choices: usize, index: u64) -> Option<usize> {
    if index == 0 {
        return None;
    }
    let zero_based = (index - 1) as usize;
    (zero_based < num_choices).then_some(zero_based)
}

/// Positive weighted entries resolved to 0-based indices, with their sum.
///
/// Used by the proportional methods for both splitting and labelling. Entries
/// referencing unknown choices disqualify the ballot (empty result), matching
/// the "never render or count a ballot you cannot fully interpret" rule.
pub(crate) fn positive_weights(num_choices: usize, choice: &Choice) -> (Vec<(usize, f64)>, f64) {
    let mut entries = Vec::new();
    let mut total = 0.0;
    for (index, weight) in choice.weight_entries() {
        let Some(idx) = resolve_index(num_choices, index) else {
            return (Vec::new(), 0.0);
        };
        if weight > 0.0 {
            entries.push((idx, weight));
            total += weight;
        }
    }
    (entries, total)
}
