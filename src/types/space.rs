use serde::{Deserialize, Serialize};

/// A named scoring strategy plus its opaque parameters.
///
/// The scoring oracle interprets the params; this SDK only forwards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringStrategy {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ScoringStrategy {
    /// Create a strategy with empty params
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            network: None,
            params: serde_json::Value::Null,
        }
    }

    /// Create a strategy with params
    pub fn with_params(name: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            network: None,
            params,
        }
    }
}

/// A governance community that owns proposals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Default scoring strategies for proposals that do not carry their own
    #[serde(default)]
    pub strategies: Vec<ScoringStrategy>,
    #[serde(default)]
    pub members: Vec<String>,
}
