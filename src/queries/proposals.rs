use anyhow::Result;
use serde_json::json;

use crate::client::HubClient;
use crate::errors::HubQueryError;
use crate::types::{Proposal, ProposalState};

const PROPOSAL_QUERY: &str = r#"
query Proposal($id: String!) {
  proposal(id: $id) {
    id
    title
    body
    type
    choices
    start
    end
    snapshot
    author
    space { id name }
    strategies { name network params }
    scores
    scores_total
    scores_state
    votes
  }
}"#;

const PROPOSALS_QUERY: &str = r#"
query Proposals($space: String!, $state: String, $first: Int!, $skip: Int!) {
  proposals(
    first: $first
    skip: $skip
    where: { space: $space, state: $state }
    orderBy: "created"
    orderDirection: desc
  ) {
    id
    title
    body
    type
    choices
    start
    end
    snapshot
    author
    space { id name }
    strategies { name network params }
    scores
    scores_total
    scores_state
    votes
  }
}"#;

/// Get a single proposal by id
pub async fn get_proposal(client: &HubClient, id: &str) -> Result<Option<Proposal>> {
    let proposal = client
        .query(PROPOSAL_QUERY, json!({ "id": id }), "proposal")
        .await
        .map_err(|e| HubQueryError::with_field(format!("proposal {}: {}", id, e), "proposal"))?;
    Ok(proposal)
}

/// Get a page of a space's proposals, optionally filtered by state
pub async fn get_proposals(
    client: &HubClient,
    space: &str,
    state: Option<ProposalState>,
    first: u32,
    skip: u32,
) -> Result<Vec<Proposal>> {
    let state = state.map(|s| s.to_string());
    let proposals = client
        .query(
            PROPOSALS_QUERY,
            json!({ "space": space, "state": state, "first": first, "skip": skip }),
            "proposals",
        )
        .await
        .map_err(|e| {
            HubQueryError::with_field(format!("proposals for {}: {}", space, e), "proposals")
        })?;
    Ok(proposals)
}
