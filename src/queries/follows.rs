use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::HubClient;
use crate::errors::HubQueryError;
use crate::types::SpaceRef;

/// A wallet's follow relationship to a space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: String,
    pub follower: String,
    pub space: SpaceRef,
    #[serde(default)]
    pub created: i64,
}

const FOLLOWS_QUERY: &str = r#"
query Follows($follower: String!) {
  follows(where: { follower: $follower }, orderBy: "created", orderDirection: desc) {
    id
    follower
    space { id name }
    created
  }
}"#;

/// Get the spaces an address follows
pub async fn get_follows(client: &HubClient, follower: &str) -> Result<Vec<Follow>> {
    let follows = client
        .query(FOLLOWS_QUERY, json!({ "follower": follower }), "follows")
        .await
        .map_err(|e| {
            HubQueryError::with_field(format!("follows for {}: {}", follower, e), "follows")
        })?;
    Ok(follows)
}
