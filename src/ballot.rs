//! Ballot construction and typed-data message shaping
//!
//! Everything the SDK contributes to a write path happens here: validating
//! that a composed `choice` has the right shape for the proposal's voting
//! method, rendering the EIP-712-style typed-data payload, and wrapping the
//! externally produced signature into the envelope the sequencer accepts.
//! Keys never enter the SDK; signing is delegated through
//! [`TypedDataSigner`], the seam to the wallet bridge.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

use crate::errors::{MalformedChoice, SigningError};
use crate::types::{BlockTag, Choice, Proposal};
use crate::voting::VotingMethod;

/// EIP-712 domain name used by the sequencer
pub const TYPED_DATA_DOMAIN: &str = "snapshot";
/// EIP-712 domain version used by the sequencer
pub const TYPED_DATA_VERSION: &str = "0.1.4";

/// Whether `address` is a well-formed 0x-prefixed 20-byte hex address
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .map(|hex_part| hex_part.len() == 40 && hex::decode(hex_part).is_ok())
        .unwrap_or(false)
}

/// Check that a composed ballot has the right shape for the voting method.
///
/// This is the write-path counterpart of the tally's tolerance: a vote we are
/// about to sign must be fully well-formed, even though a malformed vote read
/// back from the hub is merely ignored.
pub fn validate_choice(
    method: VotingMethod,
    choice: &Choice,
    num_choices: usize,
) -> Result<(), MalformedChoice> {
    let fail = |message: String| Err(MalformedChoice::with_method(message, method.as_str()));

    match method {
        VotingMethod::SingleChoice | VotingMethod::Basic => match choice.as_single() {
            Some(index) if index >= 1 && index as usize <= num_choices => Ok(()),
            Some(index) => fail(format!("choice index {} out of range", index)),
            None => fail("expected a single 1-based choice index".to_string()),
        },
        VotingMethod::Approval | VotingMethod::RankedChoice => {
            let Some(indices) = choice.as_indices() else {
                return fail("expected a list of 1-based choice indices".to_string());
            };
            if indices.is_empty() {
                return fail("empty selection".to_string());
            }
            let mut seen = HashSet::new();
            for &index in indices {
                if index < 1 || index as usize > num_choices {
                    return fail(format!("choice index {} out of range", index));
                }
                if !seen.insert(index) {
                    return fail(format!("duplicate choice index {}", index));
                }
            }
            Ok(())
        }
        VotingMethod::Quadratic | VotingMethod::Weighted => {
            let Choice::Weighted(weights) = choice else {
                return fail("expected a choice-index to weight mapping".to_string());
            };
            let mut positive = false;
            for (key, weight) in weights {
                let Ok(index) = key.parse::<u64>() else {
                    return fail(format!("weight key '{}' is not a choice index", key));
                };
                if index < 1 || index as usize > num_choices {
                    return fail(format!("choice index {} out of range", index));
                }
                if !weight.is_finite() || *weight < 0.0 {
                    return fail(format!("invalid weight {} for choice {}", weight, index));
                }
                if *weight > 0.0 {
                    positive = true;
                }
            }
            if !positive {
                return fail("all weights are zero".to_string());
            }
            Ok(())
        }
    }
}

fn typed_data(primary_type: &str, fields: serde_json::Value, message: serde_json::Value) -> serde_json::Value {
    json!({
        "domain": { "name": TYPED_DATA_DOMAIN, "version": TYPED_DATA_VERSION },
        "primaryType": primary_type,
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" }
            ],
            primary_type: fields
        },
        "message": message
    })
}

/// A ballot ready for signing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteMessage {
    pub space: String,
    pub proposal: String,
    #[serde(rename = "type")]
    pub voting_method: VotingMethod,
    pub choice: Choice,
    pub timestamp: i64,
}

impl VoteMessage {
    /// Build a ballot for `proposal`, rejecting a wrong-shaped choice before
    /// anything reaches the signer.
    pub fn new(space: &str, proposal: &Proposal, choice: Choice) -> Result<Self, MalformedChoice> {
        validate_choice(proposal.voting_method, &choice, proposal.choices.len())?;
        Ok(Self {
            space: space.to_string(),
            proposal: proposal.id.clone(),
            voting_method: proposal.voting_method,
            choice,
            timestamp: Utc::now().timestamp(),
        })
    }

    /// The typed-data payload handed to the wallet bridge
    pub fn to_typed_data(&self) -> serde_json::Value {
        typed_data(
            "Vote",
            json!([
                { "name": "space", "type": "string" },
                { "name": "proposal", "type": "string" },
                { "name": "type", "type": "string" },
                { "name": "choice", "type": "string" },
                { "name": "timestamp", "type": "uint64" }
            ]),
            json!({
                "space": self.space,
                "proposal": self.proposal,
                "type": self.voting_method.as_str(),
                // Polymorphic on the wire; serialized as its JSON form
                "choice": serde_json::to_string(&self.choice).unwrap_or_default(),
                "timestamp": self.timestamp,
            }),
        )
    }
}

/// A proposal submission ready for signing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalMessage {
    pub space: String,
    #[serde(rename = "type")]
    pub voting_method: VotingMethod,
    pub title: String,
    pub body: String,
    pub choices: Vec<String>,
    pub start: i64,
    pub end: i64,
    pub snapshot: BlockTag,
    pub timestamp: i64,
}

impl ProposalMessage {
    pub fn new(
        space: &str,
        voting_method: VotingMethod,
        title: &str,
        body: &str,
        choices: Vec<String>,
        start: i64,
        end: i64,
        snapshot: BlockTag,
    ) -> Self {
        Self {
            space: space.to_string(),
            voting_method,
            title: title.to_string(),
            body: body.to_string(),
            choices,
            start,
            end,
            snapshot,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// The typed-data payload handed to the wallet bridge
    pub fn to_typed_data(&self) -> serde_json::Value {
        typed_data(
            "Proposal",
            json!([
                { "name": "space", "type": "string" },
                { "name": "type", "type": "string" },
                { "name": "title", "type": "string" },
                { "name": "body", "type": "string" },
                { "name": "choices", "type": "string[]" },
                { "name": "start", "type": "uint64" },
                { "name": "end", "type": "uint64" },
                { "name": "snapshot", "type": "string" },
                { "name": "timestamp", "type": "uint64" }
            ]),
            json!({
                "space": self.space,
                "type": self.voting_method.as_str(),
                "title": self.title,
                "body": self.body,
                "choices": self.choices,
                "start": self.start,
                "end": self.end,
                "snapshot": self.snapshot.to_string(),
                "timestamp": self.timestamp,
            }),
        )
    }
}

/// A follow/unfollow action ready for signing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowMessage {
    pub space: String,
    pub follow: bool,
    pub timestamp: i64,
}

impl FollowMessage {
    pub fn new(space: &str, follow: bool) -> Self {
        Self {
            space: space.to_string(),
            follow,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// The typed-data payload handed to the wallet bridge
    pub fn to_typed_data(&self) -> serde_json::Value {
        let primary_type = if self.follow { "Follow" } else { "Unfollow" };
        typed_data(
            primary_type,
            json!([
                { "name": "space", "type": "string" },
                { "name": "timestamp", "type": "uint64" }
            ]),
            json!({
                "space": self.space,
                "timestamp": self.timestamp,
            }),
        )
    }
}

/// External wallet bridge: produces a signature for a typed-data payload.
///
/// The SDK never sees key material; implementations forward the payload to
/// whatever holds the keys (wallet-connect session, hardware signer, test
/// stub).
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
    /// Address of the connected wallet
    fn address(&self) -> String;

    /// Sign a typed-data payload, returning the 0x-prefixed signature
    async fn sign_typed_data(&self, payload: &serde_json::Value) -> Result<String, SigningError>;
}

/// A signed message ready for the sequencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub address: String,
    pub sig: String,
    pub data: serde_json::Value,
}

/// Sign a typed-data payload and wrap it for broadcast.
pub async fn sign_message(
    signer: &dyn TypedDataSigner,
    data: serde_json::Value,
) -> Result<SignedEnvelope, SigningError> {
    let address = signer.address();
    if !is_valid_address(&address) {
        return Err(SigningError::new(format!(
            "signer returned malformed address '{}'",
            address
        )));
    }

    let sig = signer.sign_typed_data(&data).await?;
    Ok(SignedEnvelope { address, sig, data })
}
