use std::collections::BTreeSet;

use crate::message::Message;
use crate::share::OperatorId;

/// An opaque signature blob. BLS threshold signature generation and
/// verification are treated as an oracle (§1 Non-goals); this type only
/// carries the bytes.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Signature(pub Vec<u8>);

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({} bytes)", self.0.len())
    }
}

/// A [`Message`] plus the set of operators that signed it and the
/// (possibly aggregated) signature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct SignedMessage {
    pub message: Message,
    pub signers: BTreeSet<OperatorId>,
    pub signature: Signature,
}

impl SignedMessage {
    pub fn new(message: Message, signers: BTreeSet<OperatorId>, signature: Signature) -> Self {
        Self {
            message,
            signers,
            signature,
        }
    }
}
