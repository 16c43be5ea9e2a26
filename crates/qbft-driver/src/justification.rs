//! Justification rules for round > 1 proposals and round-change requests
//! (§4.2 "Justifying a proposal").

use std::collections::BTreeSet;

use qbft_types::{MsgType, OperatorId, Round, Share, SignedMessage};

use crate::error::ValidationError;
use crate::payload::decode_round_change;

/// A round-change quorum justifies moving to `round` iff at least `Q`
/// distinct committee members sent a RoundChange message naming it.
pub fn validate_round_change_justification(
    round: Round,
    justification: &[SignedMessage],
    share: &Share,
) -> Result<(), ValidationError> {
    if justification.is_empty() {
        return Err(ValidationError::MissingRoundChangeJustification(round));
    }

    for msg in justification {
        if msg.message.msg_type != MsgType::RoundChange || msg.message.round != round {
            return Err(ValidationError::MissingRoundChangeJustification(round));
        }
        if !msg.signers.iter().all(|s| share.is_member(*s)) {
            return Err(ValidationError::NotInCommittee);
        }
    }

    let signers: BTreeSet<OperatorId> = justification
        .iter()
        .flat_map(|m| m.signers.iter().copied())
        .collect();
    if signers.len() < share.quorum() {
        return Err(ValidationError::MissingRoundChangeJustification(round));
    }

    Ok(())
}

/// The highest `(prepared_round, prepared_value)` claimed across a
/// round-change quorum, if any member had prepared a value before
/// requesting the round change.
pub fn highest_prepared(justification: &[SignedMessage]) -> Option<(Round, Vec<u8>)> {
    let mut best: Option<(Round, Vec<u8>)> = None;

    for msg in justification {
        let Ok(data) = decode_round_change(&msg.message.data) else {
            continue;
        };
        if let (Some(round), Some(value)) = (data.prepared_round, data.prepared_value) {
            if best.as_ref().is_none_or(|(best_round, _)| round > *best_round) {
                best = Some((round, value));
            }
        }
    }

    best
}

/// A claimed `(round, value)` is justified iff at least `Q` distinct
/// committee members sent a matching Prepare for exactly that round and
/// value.
pub fn validate_prepare_justification(
    round: Round,
    value: &[u8],
    justification: &[SignedMessage],
    share: &Share,
) -> Result<(), ValidationError> {
    for msg in justification {
        if msg.message.msg_type != MsgType::Prepare
            || msg.message.round != round
            || msg.message.data != value
        {
            return Err(ValidationError::MissingPrepareJustification(round));
        }
        if !msg.signers.iter().all(|s| share.is_member(*s)) {
            return Err(ValidationError::NotInCommittee);
        }
    }

    let signers: BTreeSet<OperatorId> = justification
        .iter()
        .flat_map(|m| m.signers.iter().copied())
        .collect();
    if signers.len() < share.quorum() {
        return Err(ValidationError::MissingPrepareJustification(round));
    }

    Ok(())
}
