use qbft_types::{MsgType, PrepareData, SignedMessage};
use tracing::warn;

use crate::error::ValidationError;
use crate::instance::Instance;
use crate::justification::{highest_prepared, validate_prepare_justification, validate_round_change_justification};
use crate::leader::leader;
use crate::output::Output;
use crate::payload::{decode_proposal, encode_prepare};

/// §4.2 "Proposal": accept at most one proposal per round from the round's
/// leader; round > 1 proposals must carry a round-change quorum and, if the
/// quorum shows a previously prepared value, a matching prepare quorum for
/// it. Accepting a proposal broadcasts this operator's own Prepare.
pub fn handle(instance: &mut Instance, msg: SignedMessage) -> Result<Vec<Output>, ValidationError> {
    let round = msg.message.round;

    let expected_leader = leader(instance.state.height, round, &instance.state.share);
    if msg.signers.len() != 1 || !msg.signers.contains(&expected_leader) {
        return Err(ValidationError::NotLeader(round));
    }

    let proposal_data = decode_proposal(&msg.message.data)?;

    if round.as_u64() > 1 {
        validate_round_change_justification(round, &proposal_data.round_change_justification, &instance.state.share)?;

        if let Some((prepared_round, prepared_value)) = highest_prepared(&proposal_data.round_change_justification) {
            validate_prepare_justification(
                prepared_round,
                &prepared_value,
                &proposal_data.prepare_justification,
                &instance.state.share,
            )?;
            if proposal_data.data != prepared_value {
                warn!(%round, "proposal value does not match the justified prepared value");
                return Err(ValidationError::MissingPrepareJustification(round));
            }
        }
    }

    // Exactly one proposal per (round, sender), for every round — not only
    // the currently active one, since a round beyond the instance's own can
    // already be justified by an in-flight round change.
    let duplicate = instance
        .state
        .propose_container
        .messages_by_round(round)
        .iter()
        .any(|existing| existing.signers == msg.signers && existing.message.data != msg.message.data);
    if duplicate {
        return Err(ValidationError::DuplicateProposal(round));
    }

    if !instance.state.propose_container.add(round, msg.clone()) {
        return Ok(Vec::new());
    }

    // Past- and future-round proposals are stored above (needed as
    // justifications) but only the instance's current round drives state.
    if round != instance.state.round || instance.state.decided {
        return Ok(Vec::new());
    }

    instance.state.proposal_accepted_for_current_round = Some(msg.clone());

    let prepare = instance.sign_own(
        MsgType::Prepare,
        round,
        encode_prepare(&PrepareData {
            data: proposal_data.data,
        }),
    );
    instance.state.prepare_container.add(round, prepare.clone());

    Ok(vec![Output::Broadcast(prepare)])
}
