//! Borsh encode/decode helpers for the typed payloads carried in
//! [`qbft_types::Message::data`] (§6 "canonical encoding").

use qbft_types::{CommitData, PrepareData, ProposalData, RoundChangeData};

use crate::error::ValidationError;

pub fn encode_proposal(data: &ProposalData) -> Vec<u8> {
    borsh::to_vec(data).expect("ProposalData encoding is infallible")
}

pub fn decode_proposal(bytes: &[u8]) -> Result<ProposalData, ValidationError> {
    borsh::from_slice(bytes).map_err(|_| ValidationError::Malformed("proposal"))
}

// Unlike `ProposalData`/`RoundChangeData`, `PrepareData`/`CommitData` carry
// no fields beyond the agreed value itself, and `MsgContainer`'s quorum
// matching (`has_quorum`, `longest_unique_signers_for_round_and_value`)
// compares `Message::data` directly against a candidate value. So these two
// encode as the value's raw bytes rather than a wrapped borsh struct — a
// length-prefixed wrapper here would make every stored Prepare/Commit
// compare unequal to the plain value callers check quorum against.

pub fn encode_prepare(data: &PrepareData) -> Vec<u8> {
    data.data.clone()
}

pub fn decode_prepare(bytes: &[u8]) -> Result<PrepareData, ValidationError> {
    Ok(PrepareData { data: bytes.to_vec() })
}

pub fn encode_commit(data: &CommitData) -> Vec<u8> {
    data.data.clone()
}

pub fn decode_commit(bytes: &[u8]) -> Result<CommitData, ValidationError> {
    Ok(CommitData { data: bytes.to_vec() })
}

pub fn encode_round_change(data: &RoundChangeData) -> Vec<u8> {
    borsh::to_vec(data).expect("RoundChangeData encoding is infallible")
}

pub fn decode_round_change(bytes: &[u8]) -> Result<RoundChangeData, ValidationError> {
    borsh::from_slice(bytes).map_err(|_| ValidationError::Malformed("round-change"))
}
