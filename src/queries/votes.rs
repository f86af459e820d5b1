use anyhow::Result;
use serde_json::json;
use tracing::debug;

use crate::client::HubClient;
use crate::errors::HubQueryError;
use crate::types::Vote;

/// Hub page size used by [`get_all_votes`]
pub const VOTES_PAGE_SIZE: u32 = 1000;

const VOTES_QUERY: &str = r#"
query Votes($proposal: String!, $first: Int!, $skip: Int!) {
  votes(
    first: $first
    skip: $skip
    where: { proposal: $proposal }
    orderBy: "created"
    orderDirection: asc
  ) {
    voter
    choice
    scores
    balance
    created
  }
}"#;

/// Get a page of votes for a proposal
pub async fn get_votes(
    client: &HubClient,
    proposal: &str,
    first: u32,
    skip: u32,
) -> Result<Vec<Vote>> {
    let votes = client
        .query(
            VOTES_QUERY,
            json!({ "proposal": proposal, "first": first, "skip": skip }),
            "votes",
        )
        .await
        .map_err(|e| HubQueryError::with_field(format!("votes for {}: {}", proposal, e), "votes"))?;
    Ok(votes)
}

/// Get every vote on a proposal, paging until the hub runs dry
pub async fn get_all_votes(client: &HubClient, proposal: &str) -> Result<Vec<Vote>> {
    let mut all = Vec::new();
    let mut skip = 0u32;

    loop {
        let page = get_votes(client, proposal, VOTES_PAGE_SIZE, skip).await?;
        let fetched = page.len() as u32;
        all.extend(page);

        if fetched < VOTES_PAGE_SIZE {
            break;
        }
        skip += VOTES_PAGE_SIZE;
    }

    debug!(proposal, count = all.len(), "fetched all votes");
    Ok(all)
}
