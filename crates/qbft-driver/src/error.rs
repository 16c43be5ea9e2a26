use qbft_types::{Height, MessageId, Round};
use thiserror::Error;

/// Validation failures for an inbound message (§7 `ValidationError`).
///
/// These are local to the handler that raised them: the instance's state
/// is left unchanged and the message is dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("message height {actual} does not match instance height {expected}")]
    WrongHeight { expected: Height, actual: Height },

    #[error("message identifier {actual} does not match instance identifier {expected}")]
    WrongIdentifier { expected: MessageId, actual: MessageId },

    #[error("signer is not a member of the committee")]
    NotInCommittee,

    #[error("signature does not verify against the claimed signers")]
    BadSignature,

    #[error("duplicate proposal for round {0} from this sender")]
    DuplicateProposal(Round),

    #[error("sender is not the leader for round {0}")]
    NotLeader(Round),

    #[error("round {0} proposal is missing a valid round-change justification")]
    MissingRoundChangeJustification(Round),

    #[error("round {0} proposal is missing a valid prepare justification")]
    MissingPrepareJustification(Round),

    #[error("no proposal accepted for round {0}, or value does not match")]
    NoMatchingAcceptedProposal(Round),

    #[error("instance has already decided")]
    AlreadyDecided,

    #[error("malformed {0} payload")]
    Malformed(&'static str),
}
