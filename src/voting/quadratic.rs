//! Quadratic voting tabulation.
//!
//! Tabulation is identical to weighted voting: the quadratic cost curve is
//! applied by the scoring oracle when the ballot's voting power is computed,
//! so by the time votes reach the tally their weights split proportionally.

use crate::types::Choice;
use crate::voting::weighted::{proportional_label, proportional_split};
use crate::voting::VotingStrategy;

pub struct QuadraticVoting;

impl VotingStrategy for QuadraticVoting {
    fn vote_split(&self, num_choices: usize, choice: &Choice) -> Vec<(usize, f64)> {
        proportional_split(num_choices, choice)
    }

    fn choice_label(&self, choices: &[String], choice: &Choice) -> String {
        proportional_label(choices, choice)
    }
}
