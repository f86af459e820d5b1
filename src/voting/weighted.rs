//! Weighted voting: the voter's balance is split across choices in
//! proportion to the ballot's weights.

use crate::types::Choice;
use crate::voting::{positive_weights, VotingStrategy};

pub struct WeightedVoting;

impl VotingStrategy for WeightedVoting {
    fn vote_split(&self, num_choices: usize, choice: &Choice) -> Vec<(usize, f64)> {
        proportional_split(num_choices, choice)
    }

    fn choice_label(&self, choices: &[String], choice: &Choice) -> String {
        proportional_label(choices, choice)
    }
}

/// Split proportionally to the ballot's positive weights.
///
/// A zero weight sum means zero contribution everywhere, never a division by
/// zero. Shared with quadratic voting, whose quadratic scaling is applied by
/// the scoring oracle at vote time, not during tabulation.
pub(crate) fn proportional_split(num_choices: usize, choice: &Choice) -> Vec<(usize, f64)> {
    let (entries, total) = positive_weights(num_choices, choice);
    if total <= 0.0 {
        return Vec::new();
    }
    entries
        .into_iter()
        .map(|(idx, weight)| (idx, weight / total))
        .collect()
}

/// Render weighted entries as `"<pct>% for <label>"`, comma joined.
pub(crate) fn proportional_label(choices: &[String], choice: &Choice) -> String {
    let (entries, total) = positive_weights(choices.len(), choice);
    if total <= 0.0 {
        return String::new();
    }
    entries
        .into_iter()
        .map(|(idx, weight)| {
            let pct = (weight / total * 100.0).round() as u32;
            format!("{}% for {}", pct, choices[idx])
        })
        .collect::<Vec<_>>()
        .join(", ")
}
