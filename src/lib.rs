pub mod ballot;
pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod queries;
pub mod scores;
pub mod types;
pub mod voting;

pub use client::{HubClient, HubError};
pub use config::{Config, HubConfig, LoggingConfig as ConfigLoggingConfig, ScoreApiConfig};

// Re-export logging module
pub use logging::{init_default_logging, init_logging, is_initialized, LogConfig, LogFormat};

// Re-export wire types
pub use types::*;

// Re-export hub queries
pub use queries::{follows::*, proposals::*, spaces::*, votes::*};

// Re-export the tabulation core
pub use voting::results::{compute_results, compute_results_with_strategies, VoteResults};
pub use voting::{choice_string, VotingMethod};

// Re-export the voting power fetcher
pub use scores::{get_scores, get_voting_power, VotingPower};

// Re-export ballot shaping and the signer seam
pub use ballot::{
    is_valid_address, sign_message, validate_choice, FollowMessage, ProposalMessage,
    SignedEnvelope, TypedDataSigner, VoteMessage,
};

// Re-export comprehensive error types
pub use errors::{
    HubQueryError, MalformedChoice, ScoreApiError, SigningError, SnapshotError, SnapshotResult,
    UnsupportedVotingMethod,
};
