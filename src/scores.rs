//! Voting power fetcher — the boundary to the off-chain scoring oracle.
//!
//! The oracle is opaque: given a space id, a strategy list, a network and a
//! block height it scores a batch of addresses. This module only shapes the
//! call and consumes the returned matrix; it holds no state, so a failed call
//! can never leave anything partially updated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::client::HubClient;
use crate::errors::ScoreApiError;
use crate::types::{BlockTag, Proposal, ScoringStrategy, Space};

/// An address's voting power under a proposal's strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingPower {
    /// Per-strategy contributions, parallel to the strategy list
    pub scores: Vec<f64>,
    /// Sum of `scores`
    pub total: f64,
}

#[derive(Serialize)]
struct ScoreRequest<'a> {
    params: ScoreParams<'a>,
}

#[derive(Serialize)]
struct ScoreParams<'a> {
    space: &'a str,
    network: &'a str,
    snapshot: BlockTag,
    strategies: &'a [ScoringStrategy],
    addresses: &'a [String],
}

#[derive(Deserialize)]
struct ScoreResponse {
    result: ScoreResult,
}

#[derive(Deserialize)]
struct ScoreResult {
    /// One map per strategy: address -> score
    scores: Vec<HashMap<String, f64>>,
}

/// Ask the scoring oracle for a score matrix: one `address -> score` map per
/// strategy, for every address in `addresses` at `snapshot`.
pub async fn get_scores(
    client: &HubClient,
    space_id: &str,
    strategies: &[ScoringStrategy],
    network: &str,
    snapshot: BlockTag,
    addresses: &[String],
) -> Result<Vec<HashMap<String, f64>>, ScoreApiError> {
    let url = format!("{}/api/scores", client.config().scores.url);
    debug!(%url, space = space_id, %snapshot, addresses = addresses.len(), "score API call");

    let request = ScoreRequest {
        params: ScoreParams {
            space: space_id,
            network,
            snapshot,
            strategies,
            addresses,
        },
    };

    let response = client
        .http()
        .post(&url)
        .timeout(Duration::from_secs(client.config().scores.timeout_secs))
        .json(&request)
        .send()
        .await
        .map_err(|e| ScoreApiError::with_url(e.to_string(), &url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScoreApiError::with_url(
            format!("oracle returned status {}", status),
            &url,
        ));
    }

    let body: ScoreResponse = response
        .json()
        .await
        .map_err(|e| ScoreApiError::with_url(format!("unusable oracle payload: {}", e), &url))?;

    Ok(body.result.scores)
}

/// Compute one address's voting power for a proposal.
///
/// Uses the proposal's own strategies when it carries any, otherwise the
/// space defaults; sums the per-strategy results into `total`. Address
/// matching against the oracle's response is case-insensitive (the oracle
/// returns checksummed addresses).
pub async fn get_voting_power(
    client: &HubClient,
    space: &Space,
    address: &str,
    proposal: &Proposal,
) -> Result<VotingPower, ScoreApiError> {
    let strategies = proposal.effective_strategies(space);
    let network = if space.network.is_empty() {
        client.config().scores.network.as_str()
    } else {
        space.network.as_str()
    };

    let addresses = vec![address.to_string()];
    let matrix = get_scores(
        client,
        &space.id,
        strategies,
        network,
        proposal.snapshot,
        &addresses,
    )
    .await?;

    Ok(fold_voting_power(&matrix, address))
}

/// Fold the oracle's score matrix into one address's voting power.
///
/// Address matching is case-insensitive: the oracle returns checksummed
/// addresses while callers usually hold lowercase ones. Strategies with no
/// entry for the address score zero.
fn fold_voting_power(matrix: &[HashMap<String, f64>], address: &str) -> VotingPower {
    let scores: Vec<f64> = matrix
        .iter()
        .map(|per_strategy| {
            per_strategy
                .iter()
                .find(|(addr, _)| addr.eq_ignore_ascii_case(address))
                .map(|(_, score)| *score)
                .unwrap_or(0.0)
        })
        .collect();
    let total = scores.iter().sum();

    VotingPower { scores, total }
}
