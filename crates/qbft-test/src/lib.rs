//! Shared fixtures for tests across the workspace: deterministic
//! committees and a stub signature oracle standing in for BLS threshold
//! signing (§1 Non-goals).

mod fixtures;
mod messages;
mod oracle;

pub use fixtures::{committee, message_id, share, shares};
pub use messages::signed_by;
pub use oracle::StubOracle;
