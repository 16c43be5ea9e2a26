use thiserror::Error;

/// Errors raised while constructing or parsing the core data types.
///
/// These are distinct from the consensus-level `ValidationError` in
/// `qbft-driver`: this crate's errors are about malformed *bytes*, not
/// about a message being invalid for a particular instance's state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown role tag: {0}")]
    UnknownRole(u8),

    #[error("committee is empty")]
    EmptyCommittee,

    #[error("operator {0} is not a member of the committee")]
    NotInCommittee(crate::share::OperatorId),
}
