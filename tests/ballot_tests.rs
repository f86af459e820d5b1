use async_trait::async_trait;
use serde_json::json;
use snapshot_rs::ballot::{
    sign_message, FollowMessage, ProposalMessage, TypedDataSigner, VoteMessage,
};
use snapshot_rs::errors::SigningError;
use snapshot_rs::types::{BlockTag, Choice, Proposal};
use snapshot_rs::voting::VotingMethod;

fn proposal(method: VotingMethod, choices: &[&str]) -> Proposal {
    serde_json::from_value(json!({
        "id": "0xproposal",
        "type": method.as_str(),
        "choices": choices,
        "start": 0,
        "end": 0,
        "snapshot": "17945000"
    }))
    .unwrap()
}

struct StubSigner {
    address: String,
}

#[async_trait]
impl TypedDataSigner for StubSigner {
    fn address(&self) -> String {
        self.address.clone()
    }

    async fn sign_typed_data(&self, payload: &serde_json::Value) -> Result<String, SigningError> {
        // Deterministic fake signature derived from the payload
        Ok(format!("0xsig:{}", payload["primaryType"].as_str().unwrap_or("?")))
    }
}

#[test]
fn test_vote_message_rejects_wrong_shape() {
    let proposal = proposal(VotingMethod::Weighted, &["A", "B"]);
    let err = VoteMessage::new("yam.eth", &proposal, Choice::Single(1)).unwrap_err();
    assert!(err.to_string().contains("Malformed choice"));
}

#[test]
fn test_vote_message_typed_data_shape() {
    let proposal = proposal(VotingMethod::SingleChoice, &["Yes", "No"]);
    let message = VoteMessage::new("yam.eth", &proposal, Choice::Single(2)).unwrap();

    let payload = message.to_typed_data();
    assert_eq!(payload["domain"]["name"], "snapshot");
    assert_eq!(payload["primaryType"], "Vote");
    assert_eq!(payload["message"]["space"], "yam.eth");
    assert_eq!(payload["message"]["proposal"], "0xproposal");
    assert_eq!(payload["message"]["type"], "single-choice");
    assert_eq!(payload["message"]["choice"], "2");
    assert!(payload["types"]["Vote"].is_array());
}

#[test]
fn test_weighted_choice_serializes_as_json_object() {
    let proposal = proposal(VotingMethod::Weighted, &["A", "B"]);
    let message =
        VoteMessage::new("yam.eth", &proposal, Choice::weighted([(1, 3.0), (2, 1.0)])).unwrap();

    let payload = message.to_typed_data();
    let choice_field = payload["message"]["choice"].as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(choice_field).unwrap();
    assert_eq!(parsed["1"], 3.0);
    assert_eq!(parsed["2"], 1.0);
}

#[test]
fn test_proposal_message_typed_data() {
    let message = ProposalMessage::new(
        "yam.eth",
        VotingMethod::Approval,
        "Fund the grants round",
        "Details in forum thread.",
        vec!["Yes".to_string(), "No".to_string()],
        1_700_000_000,
        1_700_600_000,
        BlockTag::Block(17_945_000),
    );

    let payload = message.to_typed_data();
    assert_eq!(payload["primaryType"], "Proposal");
    assert_eq!(payload["message"]["type"], "approval");
    assert_eq!(payload["message"]["snapshot"], "17945000");
    assert_eq!(payload["message"]["choices"][1], "No");
}

#[test]
fn test_follow_message_primary_type() {
    assert_eq!(
        FollowMessage::new("yam.eth", true).to_typed_data()["primaryType"],
        "Follow"
    );
    assert_eq!(
        FollowMessage::new("yam.eth", false).to_typed_data()["primaryType"],
        "Unfollow"
    );
}

#[tokio::test]
async fn test_sign_message_wraps_envelope() {
    let signer = StubSigner {
        address: "0x1111111111111111111111111111111111111111".to_string(),
    };
    let proposal = proposal(VotingMethod::SingleChoice, &["Yes", "No"]);
    let message = VoteMessage::new("yam.eth", &proposal, Choice::Single(1)).unwrap();

    let envelope = sign_message(&signer, message.to_typed_data()).await.unwrap();
    assert_eq!(envelope.address, signer.address());
    assert_eq!(envelope.sig, "0xsig:Vote");
    assert_eq!(envelope.data["primaryType"], "Vote");
}

#[tokio::test]
async fn test_sign_message_rejects_bad_signer_address() {
    let signer = StubSigner {
        address: "not-an-address".to_string(),
    };
    let err = sign_message(&signer, json!({})).await.unwrap_err();
    assert!(err.message.contains("malformed address"));
}
