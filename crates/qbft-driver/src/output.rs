use std::collections::BTreeSet;
use std::time::Duration;

use qbft_types::{Height, MessageId, OperatorId, Round, Signature, SignedMessage};

/// A decided value, ready for the role-specific signing pipeline (§6
/// "Decided output").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decided {
    pub identifier: MessageId,
    pub height: Height,
    pub round: Round,
    pub value: Vec<u8>,
    pub signers: BTreeSet<OperatorId>,
    pub signature: Signature,
}

/// Everything an [`crate::Instance`] emits instead of performing I/O
/// itself (§4.2, §5 "a handler is an atomic step from the State's
/// perspective"). The caller (the [`crate`] consumer, ultimately the
/// engine layer) is responsible for broadcasting, scheduling the timer,
/// and notifying the duty pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// Broadcast this already-signed message to the committee.
    Broadcast(SignedMessage),
    /// (Re-)arm the round timer for `round`, cancelling any previous one.
    ScheduleTimeout(Round, Duration),
    /// The instance has decided.
    Decided(Decided),
}
