use anyhow::Result;
use serde_json::json;

use crate::client::HubClient;
use crate::errors::HubQueryError;
use crate::types::Space;

const SPACE_QUERY: &str = r#"
query Space($id: String!) {
  space(id: $id) {
    id
    name
    about
    network
    symbol
    avatar
    strategies { name network params }
    members
  }
}"#;

const SPACES_QUERY: &str = r#"
query Spaces($ids: [String!]!) {
  spaces(where: { id_in: $ids }) {
    id
    name
    about
    network
    symbol
    avatar
    strategies { name network params }
    members
  }
}"#;

/// Get a single space by id
pub async fn get_space(client: &HubClient, id: &str) -> Result<Option<Space>> {
    let space = client
        .query(SPACE_QUERY, json!({ "id": id }), "space")
        .await
        .map_err(|e| HubQueryError::with_field(format!("space {}: {}", id, e), "space"))?;
    Ok(space)
}

/// Get multiple spaces by id (batch)
pub async fn get_spaces(client: &HubClient, ids: &[String]) -> Result<Vec<Space>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let spaces = client
        .query(SPACES_QUERY, json!({ "ids": ids }), "spaces")
        .await
        .map_err(|e| HubQueryError::with_field(format!("spaces: {}", e), "spaces"))?;
    Ok(spaces)
}
