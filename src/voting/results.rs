//! Results aggregation over weighted ballots.
//!
//! Pure functions of `(proposal, votes)`: recomputed on demand whenever votes
//! are refetched, never persisted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Proposal, ScoringStrategy, Vote};

/// Aggregated tally for one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResults {
    /// Cumulative weighted balance per choice (one entry per choice label)
    pub results_by_vote_balance: Vec<f64>,
    /// Per-choice vector of per-strategy cumulative contributions
    pub results_by_strategy_score: Vec<Vec<f64>>,
    /// Sum over `results_by_vote_balance`, the normalization base for
    /// percentage display. For approval voting this can exceed the total cast
    /// voting power, since every approved choice receives the full balance.
    pub sum_of_results_balance: f64,
}

/// Tally `votes` under the proposal's voting method.
///
/// The strategy-score matrix is sized by the proposal's own strategies; when
/// the proposal inherits from its space, use
/// [`compute_results_with_strategies`] or fall back to the widest score
/// vector seen in the votes. A malformed ballot contributes zero to every
/// choice; the tally itself never fails.
pub fn compute_results(proposal: &Proposal, votes: &[Vote]) -> VoteResults {
    let num_strategies = if proposal.strategies.is_empty() {
        votes.iter().map(|v| v.scores.len()).max().unwrap_or(0)
    } else {
        proposal.strategies.len()
    };
    tally(proposal, votes, num_strategies)
}

/// Tally with an explicit strategy list (e.g. the owning space's defaults).
pub fn compute_results_with_strategies(
    proposal: &Proposal,
    strategies: &[ScoringStrategy],
    votes: &[Vote],
) -> VoteResults {
    tally(proposal, votes, strategies.len())
}

fn tally(proposal: &Proposal, votes: &[Vote], num_strategies: usize) -> VoteResults {
    let num_choices = proposal.choices.len();
    let strategy = proposal.voting_method.strategy();

    let mut by_balance = vec![0.0f64; num_choices];
    let mut by_score = vec![vec![0.0f64; num_strategies]; num_choices];

    for vote in votes {
        let split = strategy.vote_split(num_choices, &vote.choice);
        if split.is_empty() {
            debug!(
                voter = %vote.voter,
                proposal = %proposal.id,
                "skipping ballot with unusable choice shape"
            );
            continue;
        }
        for (idx, fraction) in split {
            by_balance[idx] += vote.balance * fraction;
            for (s, slot) in by_score[idx].iter_mut().enumerate() {
                *slot += vote.scores.get(s).copied().unwrap_or(0.0) * fraction;
            }
        }
    }

    let sum_of_results_balance = by_balance.iter().sum();
    VoteResults {
        results_by_vote_balance: by_balance,
        results_by_strategy_score: by_score,
        sum_of_results_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Choice;
    use crate::voting::VotingMethod;

    fn proposal(method: VotingMethod, choices: &[&str]) -> Proposal {
        Proposal {
            id: "0xproposal".to_string(),
            space: None,
            title: String::new(),
            body: String::new(),
            voting_method: method,
            choices: choices.iter().map(|c| c.to_string()).collect(),
            start: 0,
            end: 0,
            snapshot: Default::default(),
            strategies: vec![],
            author: String::new(),
            scores: None,
            scores_total: None,
            scores_state: None,
            votes: None,
        }
    }

    fn vote(choice: Choice, scores: Vec<f64>) -> Vote {
        Vote {
            voter: "0x1111111111111111111111111111111111111111".to_string(),
            choice,
            balance: scores.iter().sum(),
            scores,
            created: 0,
        }
    }

    #[test]
    fn test_empty_vote_list_is_all_zero() {
        let results = compute_results(&proposal(VotingMethod::SingleChoice, &["A", "B"]), &[]);
        assert_eq!(results.results_by_vote_balance, vec![0.0, 0.0]);
        assert_eq!(results.sum_of_results_balance, 0.0);
    }

    #[test]
    fn test_strategy_score_matrix_shape() {
        let votes = vec![vote(Choice::Single(1), vec![4.0, 6.0])];
        let results = compute_results(&proposal(VotingMethod::SingleChoice, &["A", "B"]), &votes);
        assert_eq!(results.results_by_strategy_score, vec![vec![4.0, 6.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn test_inherited_space_strategies_size_the_matrix() {
        use crate::types::{ScoringStrategy, Space};

        let space = Space {
            id: "yam.eth".to_string(),
            name: String::new(),
            about: None,
            network: "1".to_string(),
            symbol: String::new(),
            avatar: None,
            strategies: vec![
                ScoringStrategy::new("erc20-balance-of"),
                ScoringStrategy::new("delegation"),
            ],
            members: vec![],
        };
        // Carries no strategies of its own, so the space defaults apply
        let proposal = proposal(VotingMethod::SingleChoice, &["A", "B"]);
        let votes = vec![vote(Choice::Single(1), vec![2.0, 3.0])];

        let results =
            compute_results_with_strategies(&proposal, proposal.effective_strategies(&space), &votes);
        assert_eq!(results.results_by_strategy_score[0].len(), 2);
        assert_eq!(results.results_by_strategy_score[0], vec![2.0, 3.0]);
        assert_eq!(results.results_by_vote_balance, vec![5.0, 0.0]);
    }

    #[test]
    fn test_short_score_vector_counts_as_zero() {
        let mut short = vote(Choice::Single(2), vec![3.0]);
        short.balance = 3.0;
        let full = vote(Choice::Single(2), vec![1.0, 2.0]);
        let results = compute_results(
            &proposal(VotingMethod::SingleChoice, &["A", "B"]),
            &[short, full],
        );
        assert_eq!(results.results_by_strategy_score[1], vec![4.0, 2.0]);
    }
}
