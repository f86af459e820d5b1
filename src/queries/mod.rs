//! Hub query functions
//!
//! This module provides functions for reading spaces, proposals, votes and
//! follows from the governance hub.

pub mod follows;
pub mod proposals;
pub mod spaces;
pub mod votes;

pub use follows::*;
pub use proposals::*;
pub use spaces::*;
pub use votes::*;
