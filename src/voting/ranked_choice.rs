//! Ranked-choice voting, tallied as first-preference only.
//!
//! The full balance goes to the voter's first-ranked choice; no instant-runoff
//! elimination rounds are performed. Downstream consumers that need true IRV
//! tabulation must run it themselves.

use crate::types::Choice;
use crate::voting::{approval::join_labels, resolve_index, VotingStrategy};

pub struct RankedChoiceVoting;

impl VotingStrategy for RankedChoiceVoting {
    fn vote_split(&self, num_choices: usize, choice: &Choice) -> Vec<(usize, f64)> {
        let Some(indices) = choice.as_indices() else {
            return Vec::new();
        };
        // The whole ranking must reference known choices for the ballot to count
        if !indices
            .iter()
            .all(|&i| resolve_index(num_choices, i).is_some())
        {
            return Vec::new();
        }
        match indices.first().and_then(|&i| resolve_index(num_choices, i)) {
            Some(first) => vec![(first, 1.0)],
            None => Vec::new(),
        }
    }

    fn choice_label(&self, choices: &[String], choice: &Choice) -> String {
        // Ballot order is the voter's preference order; keep it
        join_labels(choices, choice)
    }
}
