//! Approval voting: every approved choice receives the voter's FULL balance.
//!
//! Balances are deliberately not split across approvals, so the sum over all
//! choices can exceed the total cast voting power. That sum is still the
//! normalization base for percentage display.

use crate::types::Choice;
use crate::voting::{resolve_index, VotingStrategy};

pub struct ApprovalVoting;

impl VotingStrategy for ApprovalVoting {
    fn vote_split(&self, num_choices: usize, choice: &Choice) -> Vec<(usize, f64)> {
        let Some(indices) = choice.as_indices() else {
            return Vec::new();
        };
        let mut split = Vec::with_capacity(indices.len());
        for &index in indices {
            let Some(idx) = resolve_index(num_choices, index) else {
                return Vec::new();
            };
            split.push((idx, 1.0));
        }
        split
    }

    fn choice_label(&self, choices: &[String], choice: &Choice) -> String {
        join_labels(choices, choice)
    }
}

/// Join the labels of a multi-index ballot in ballot order.
///
/// Any reference to an unknown choice renders the whole ballot as `""`.
/// Shared with ranked-choice, where ballot order is the preference order.
pub(crate) fn join_labels(choices: &[String], choice: &Choice) -> String {
    let Some(indices) = choice.as_indices() else {
        return String::new();
    };
    let mut labels = Vec::with_capacity(indices.len());
    for &index in indices {
        match resolve_index(choices.len(), index) {
            Some(idx) => labels.push(choices[idx].as_str()),
            None => return String::new(),
        }
    }
    labels.join(", ")
}
