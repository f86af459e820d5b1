//! Configuration module for the Snapshot SDK
//! Provides hub, score API and logging configuration with builder setters
//! and environment overrides.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default hub (GraphQL) endpoint
pub const DEFAULT_HUB_URL: &str = "https://hub.snapshot.org";
/// Default sequencer endpoint for broadcasting signed messages
pub const DEFAULT_SEQUENCER_URL: &str = "https://seq.snapshot.org";
/// Default scoring oracle endpoint
pub const DEFAULT_SCORE_URL: &str = "https://score.snapshot.org";
/// Default chain network id (Ethereum mainnet)
pub const DEFAULT_NETWORK: &str = "1";

/// Hub endpoints per named environment
pub fn get_hub_endpoint(env: &str) -> &'static str {
    match env {
        "production" | "main" => DEFAULT_HUB_URL,
        "demo" | "testnet" => "https://testnet.hub.snapshot.org",
        _ => DEFAULT_HUB_URL,
    }
}

/// Hub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    pub url: String,
    pub sequencer_url: String,
    pub timeout_secs: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_HUB_URL.to_string(),
            sequencer_url: DEFAULT_SEQUENCER_URL.to_string(),
            timeout_secs: 20,
        }
    }
}

/// Score API (voting power oracle) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreApiConfig {
    pub url: String,
    pub network: String,
    pub timeout_secs: u64,
}

impl Default for ScoreApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SCORE_URL.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub debug: bool,
    pub trace: bool,
    pub record_log: bool,
    pub logging_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            trace: false,
            record_log: false,
            logging_dir: "~/.snapshot/logs".to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub hub: HubConfig,
    pub scores: ScoreApiConfig,
    pub logging: LoggingConfig,
    /// Additional custom configuration
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config for a named hub environment
    pub fn for_env(env: &str) -> Self {
        Self {
            hub: HubConfig {
                url: get_hub_endpoint(env).to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Set the hub URL directly
    pub fn with_hub_url(mut self, url: &str) -> Self {
        self.hub.url = url.to_string();
        self
    }

    /// Set the sequencer URL directly
    pub fn with_sequencer_url(mut self, url: &str) -> Self {
        self.hub.sequencer_url = url.to_string();
        self
    }

    /// Set the score API URL directly
    pub fn with_score_url(mut self, url: &str) -> Self {
        self.scores.url = url.to_string();
        self
    }

    /// Set the default network for score API calls
    pub fn with_network(mut self, network: &str) -> Self {
        self.scores.network = network.to_string();
        self
    }

    /// Set the score API request timeout in seconds
    pub fn with_score_timeout(mut self, secs: u64) -> Self {
        self.scores.timeout_secs = secs;
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.logging.debug = debug;
        self
    }

    /// Load config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SNAPSHOT_HUB") {
            config.hub.url = url;
        }

        if let Ok(url) = std::env::var("SNAPSHOT_SEQUENCER") {
            config.hub.sequencer_url = url;
        }

        if let Ok(url) = std::env::var("SNAPSHOT_SCORE_API") {
            config.scores.url = url;
        }

        if let Ok(network) = std::env::var("SNAPSHOT_NETWORK") {
            config.scores.network = network;
        }

        if std::env::var("SNAPSHOT_DEBUG").is_ok() {
            config.logging.debug = true;
        }

        config
    }
}
