//! Wire data models for the hub and score API
//!
//! These structs mirror the JSON shapes served by the governance hub. Fields
//! that the hub may omit carry `#[serde(default)]` so partial query
//! selections still deserialize.

pub mod proposal;
pub mod space;
pub mod vote;

pub use proposal::{BlockTag, Proposal, ProposalState, SpaceRef};
pub use space::{ScoringStrategy, Space};
pub use vote::{Choice, Vote};
