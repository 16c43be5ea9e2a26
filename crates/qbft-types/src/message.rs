use crate::height::Height;
use crate::message_id::MessageId;
use crate::round::Round;

/// The four QBFT message kinds (§3).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub enum MsgType {
    Proposal,
    Prepare,
    Commit,
    RoundChange,
}

/// An unsigned consensus message. `data` is a typed payload decoded
/// according to `msg_type` (see [`ProposalData`], [`PrepareData`],
/// [`CommitData`], [`RoundChangeData`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Message {
    pub msg_type: MsgType,
    pub height: Height,
    pub round: Round,
    pub identifier: MessageId,
    pub data: Vec<u8>,
}

impl Message {
    pub fn new(
        msg_type: MsgType,
        height: Height,
        round: Round,
        identifier: MessageId,
        data: Vec<u8>,
    ) -> Self {
        Self {
            msg_type,
            height,
            round,
            identifier,
            data,
        }
    }
}

/// Payload of a [`MsgType::Proposal`] message.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct ProposalData {
    pub data: Vec<u8>,
    pub round_change_justification: Vec<crate::signed_message::SignedMessage>,
    pub prepare_justification: Vec<crate::signed_message::SignedMessage>,
}

/// Payload of a [`MsgType::Prepare`] message.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct PrepareData {
    pub data: Vec<u8>,
}

/// Payload of a [`MsgType::Commit`] message.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct CommitData {
    pub data: Vec<u8>,
}

/// Payload of a [`MsgType::RoundChange`] message.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct RoundChangeData {
    pub prepared_round: Option<Round>,
    pub prepared_value: Option<Vec<u8>>,
    /// The Prepare quorum that justifies `(prepared_round, prepared_value)`,
    /// empty when the sender has never prepared a value.
    pub prepare_justification: Vec<crate::signed_message::SignedMessage>,
}
