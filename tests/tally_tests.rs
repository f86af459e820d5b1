use proptest::prelude::*;
use snapshot_rs::types::{Choice, Proposal, Vote};
use snapshot_rs::voting::results::compute_results;
use snapshot_rs::voting::{choice_string, VotingMethod};

fn proposal(method: VotingMethod, choices: &[&str]) -> Proposal {
    serde_json::from_value(serde_json::json!({
        "id": "0xproposal",
        "type": method.as_str(),
        "choices": choices,
        "start": 0,
        "end": 0,
        "snapshot": "latest"
    }))
    .unwrap()
}

fn vote(choice: Choice, balance: f64) -> Vote {
    Vote {
        voter: "0x1111111111111111111111111111111111111111".to_string(),
        choice,
        scores: vec![balance],
        balance,
        created: 0,
    }
}

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_single_choice_scenario() {
    // choices=["Yes","No"], one vote {choice:1, balance:10}
    let proposal = proposal(VotingMethod::SingleChoice, &["Yes", "No"]);
    let votes = vec![vote(Choice::Single(1), 10.0)];

    let results = compute_results(&proposal, &votes);
    assert_eq!(results.results_by_vote_balance, vec![10.0, 0.0]);
    assert_eq!(results.sum_of_results_balance, 10.0);
}

#[test]
fn test_approval_scenario_full_balance_per_choice() {
    // choices=["A","B","C"], vote {choice:[1,3], balance:5}
    let proposal = proposal(VotingMethod::Approval, &["A", "B", "C"]);
    let votes = vec![vote(Choice::Multiple(vec![1, 3]), 5.0)];

    let results = compute_results(&proposal, &votes);
    assert_eq!(results.results_by_vote_balance, vec![5.0, 0.0, 5.0]);
    // Deliberately exceeds the cast voting power
    assert_eq!(results.sum_of_results_balance, 10.0);
}

#[test]
fn test_quadratic_scenario_proportional_split() {
    // choices=["A","B"], vote {choice:{1:3,2:1}, balance:8}
    let proposal = proposal(VotingMethod::Quadratic, &["A", "B"]);
    let votes = vec![vote(Choice::weighted([(1, 3.0), (2, 1.0)]), 8.0)];

    let results = compute_results(&proposal, &votes);
    assert_close(results.results_by_vote_balance[0], 6.0);
    assert_close(results.results_by_vote_balance[1], 2.0);
    assert_close(results.sum_of_results_balance, 8.0);
}

#[test]
fn test_ranked_choice_scenario_first_preference_only() {
    // choices=["A","B","C"], vote {choice:[2,1,3], balance:4}
    let proposal = proposal(VotingMethod::RankedChoice, &["A", "B", "C"]);
    let votes = vec![vote(Choice::Multiple(vec![2, 1, 3]), 4.0)];

    let results = compute_results(&proposal, &votes);
    assert_eq!(results.results_by_vote_balance, vec![0.0, 4.0, 0.0]);
}

#[test]
fn test_malformed_ballot_scenario_contributes_zero() {
    // A null choice on a single-choice proposal contributes nothing
    let proposal = proposal(VotingMethod::SingleChoice, &["Yes", "No"]);
    let corrupt: Vote = serde_json::from_value(serde_json::json!({
        "voter": "0x2222222222222222222222222222222222222222",
        "choice": null,
        "scores": [7.0],
        "balance": 7.0
    }))
    .unwrap();
    let votes = vec![corrupt, vote(Choice::Single(2), 3.0)];

    let results = compute_results(&proposal, &votes);
    assert_eq!(results.results_by_vote_balance, vec![0.0, 3.0]);
    assert_eq!(results.sum_of_results_balance, 3.0);
}

#[test]
fn test_mixed_shapes_never_abort_the_tally() {
    let proposal = proposal(VotingMethod::Weighted, &["A", "B"]);
    let votes = vec![
        // Wrong shape for the method
        vote(Choice::Single(1), 10.0),
        // Zero weight sum
        vote(Choice::weighted([(1, 0.0), (2, 0.0)]), 10.0),
        // Well-formed
        vote(Choice::weighted([(1, 1.0), (2, 1.0)]), 10.0),
    ];

    let results = compute_results(&proposal, &votes);
    assert_close(results.results_by_vote_balance[0], 5.0);
    assert_close(results.results_by_vote_balance[1], 5.0);
    assert_close(results.sum_of_results_balance, 10.0);
    assert!(results.results_by_vote_balance.iter().all(|v| v.is_finite()));
}

#[test]
fn test_basic_tallies_like_single_choice() {
    let proposal = proposal(VotingMethod::Basic, &["For", "Against", "Abstain"]);
    let votes = vec![
        vote(Choice::Single(1), 12.0),
        vote(Choice::Single(1), 3.0),
        vote(Choice::Single(3), 5.0),
    ];

    let results = compute_results(&proposal, &votes);
    assert_eq!(results.results_by_vote_balance, vec![15.0, 0.0, 5.0]);
}

#[test]
fn test_strategy_score_breakdown_splits_like_balance() {
    let mut proposal = proposal(VotingMethod::Weighted, &["A", "B"]);
    proposal.strategies = vec![
        snapshot_rs::types::ScoringStrategy::new("erc20-balance-of"),
        snapshot_rs::types::ScoringStrategy::new("delegation"),
    ];

    let votes = vec![Vote {
        voter: "0x1111111111111111111111111111111111111111".to_string(),
        choice: Choice::weighted([(1, 3.0), (2, 1.0)]),
        scores: vec![4.0, 4.0],
        balance: 8.0,
        created: 0,
    }];

    let results = compute_results(&proposal, &votes);
    assert_close(results.results_by_strategy_score[0][0], 3.0);
    assert_close(results.results_by_strategy_score[0][1], 3.0);
    assert_close(results.results_by_strategy_score[1][0], 1.0);
    assert_close(results.results_by_strategy_score[1][1], 1.0);
}

#[test]
fn test_choice_string_scenarios() {
    let single = proposal(VotingMethod::SingleChoice, &["Yes", "No"]);
    assert_eq!(choice_string(&single, &Choice::Single(1)), "Yes");

    let ranked = proposal(VotingMethod::RankedChoice, &["A", "B", "C"]);
    assert_eq!(
        choice_string(&ranked, &Choice::Multiple(vec![2, 1, 3])),
        "B, A, C"
    );

    let weighted = proposal(VotingMethod::Weighted, &["A", "B"]);
    assert_eq!(
        choice_string(&weighted, &Choice::weighted([(1, 3.0), (2, 1.0)])),
        "75% for A, 25% for B"
    );

    // Out-of-range and empty selections render empty, never panic
    assert_eq!(choice_string(&single, &Choice::Single(9)), "");
    assert_eq!(choice_string(&ranked, &Choice::Empty), "");
    assert_eq!(
        choice_string(&weighted, &Choice::weighted([(1, 0.0), (2, 0.0)])),
        ""
    );
}

fn balance_strategy() -> impl Strategy<Value = f64> {
    // Realistic voting power magnitudes, strictly positive
    (1u64..1_000_000u64).prop_map(|raw| raw as f64 / 100.0)
}

proptest! {
    #[test]
    fn prop_single_choice_partitions_balance_exactly_once(
        ballots in prop::collection::vec((1u64..=4, balance_strategy()), 1..50)
    ) {
        let proposal = proposal(VotingMethod::SingleChoice, &["A", "B", "C", "D"]);
        let votes: Vec<Vote> = ballots
            .iter()
            .map(|&(idx, balance)| vote(Choice::Single(idx), balance))
            .collect();

        let results = compute_results(&proposal, &votes);
        let cast: f64 = votes.iter().map(|v| v.balance).sum();
        prop_assert!((results.sum_of_results_balance - cast).abs() <= 1e-6 * cast.max(1.0));
    }

    #[test]
    fn prop_approval_counts_full_balance_k_times(
        approvals in prop::collection::btree_set(1u64..=4, 1..=4),
        balance in balance_strategy()
    ) {
        let proposal = proposal(VotingMethod::Approval, &["A", "B", "C", "D"]);
        let k = approvals.len();
        let votes = vec![vote(Choice::Multiple(approvals.into_iter().collect()), balance)];

        let results = compute_results(&proposal, &votes);
        let touched = results
            .results_by_vote_balance
            .iter()
            .filter(|&&entry| entry > 0.0)
            .count();
        prop_assert_eq!(touched, k);
        for entry in results.results_by_vote_balance.iter().filter(|&&e| e > 0.0) {
            prop_assert!((entry - balance).abs() <= 1e-9 * balance.max(1.0));
        }
        let expected_sum = balance * k as f64;
        prop_assert!((results.sum_of_results_balance - expected_sum).abs() <= 1e-6 * expected_sum);
    }

    #[test]
    fn prop_weighted_split_sums_to_balance(
        weights in prop::collection::vec(0u64..100, 3),
        balance in balance_strategy()
    ) {
        prop_assume!(weights.iter().sum::<u64>() > 0);
        let proposal = proposal(VotingMethod::Weighted, &["A", "B", "C"]);
        let choice = Choice::weighted(
            weights.iter().enumerate().map(|(i, &w)| (i as u64 + 1, w as f64)),
        );
        let votes = vec![vote(choice, balance)];

        let results = compute_results(&proposal, &votes);
        prop_assert!(
            (results.sum_of_results_balance - balance).abs() <= 1e-6 * balance.max(1.0)
        );
        prop_assert!(results.results_by_vote_balance.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn prop_choice_string_is_idempotent(
        indices in prop::collection::vec(1u64..=3, 1..=3)
    ) {
        let proposal = proposal(VotingMethod::Approval, &["A", "B", "C"]);
        let choice = Choice::Multiple(indices);
        let first = choice_string(&proposal, &choice);
        let second = choice_string(&proposal, &choice);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_ranked_choice_round_trip_preserves_preference_order() {
    let proposal = proposal(VotingMethod::RankedChoice, &["A", "B", "C"]);
    let ranking = vec![3, 1, 2];
    let choice = Choice::Multiple(ranking.clone());

    let rendered = choice_string(&proposal, &choice);
    let labels: Vec<&str> = rendered.split(", ").collect();
    let recovered: Vec<u64> = labels
        .iter()
        .map(|label| {
            proposal
                .choices
                .iter()
                .position(|c| c == label)
                .map(|i| i as u64 + 1)
                .unwrap()
        })
        .collect();

    assert_eq!(recovered, ranking);
}
