//! Single-choice voting: the one selected choice receives the voter's full
//! balance. Also covers `basic` (For/Against/Abstain) proposals.

use crate::types::Choice;
use crate::voting::{resolve_index, VotingStrategy};

pub struct SingleChoiceVoting;

impl VotingStrategy for SingleChoiceVoting {
    fn vote_split(&self, num_choices: usize, choice: &Choice) -> Vec<(usize, f64)> {
        match choice.as_single().and_then(|i| resolve_index(num_choices, i)) {
            Some(idx) => vec![(idx, 1.0)],
            None => Vec::new(),
        }
    }

    fn choice_label(&self, choices: &[String], choice: &Choice) -> String {
        choice
            .as_single()
            .and_then(|i| resolve_index(choices.len(), i))
            .map(|idx| choices[idx].clone())
            .unwrap_or_default()
    }
}
