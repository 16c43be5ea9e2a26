use qbft_types::{MsgType, ProposalData, Round, RoundChangeData, SignedMessage};
use tracing::info;

use crate::error::ValidationError;
use crate::instance::Instance;
use crate::justification::{highest_prepared, validate_prepare_justification};
use crate::leader::is_local_leader;
use crate::output::Output;
use crate::payload::{decode_round_change, encode_proposal, encode_round_change};
use crate::timeout::round_timeout;

/// §4.2 "RoundChange": an `F + 1` partial quorum for a higher round is
/// enough for this operator to jump to it; a full `Q` quorum lets that
/// round's leader re-propose, preferring the highest prepared value any
/// signer in the quorum reports.
pub fn handle(instance: &mut Instance, msg: SignedMessage) -> Result<Vec<Output>, ValidationError> {
    let round = msg.message.round;
    let data = decode_round_change(&msg.message.data)?;

    if let (Some(prepared_round), Some(prepared_value)) = (data.prepared_round, &data.prepared_value) {
        validate_prepare_justification(
            prepared_round,
            prepared_value,
            &data.prepare_justification,
            &instance.state.share,
        )?;
    }

    instance.state.round_change_container.add(round, msg);

    if instance.state.decided {
        return Ok(Vec::new());
    }

    let mut outputs = Vec::new();

    if round > instance.state.round
        && instance
            .state
            .round_change_container
            .has_distinct_signer_partial_quorum(&instance.state.share, round)
    {
        outputs.extend(jump_to_round(instance, round));
    }

    if instance.state.round == round
        && !instance.state.decided
        && is_local_leader(instance.state.height, round, &instance.state.share)
        && instance
            .state
            .propose_container
            .messages_by_round(round)
            .iter()
            .all(|m| !m.signers.contains(&instance.state.share.operator_id()))
    {
        if let Some(quorum) = instance
            .state
            .round_change_container
            .distinct_signer_quorum_messages(&instance.state.share, round)
        {
            outputs.extend(repropose(instance, round, &quorum));
        }
    }

    Ok(outputs)
}

/// This operator has seen `F + 1` distinct round-change requests for a
/// round beyond its own: catch up to it and announce its own request,
/// carrying its best prepared value if it has one.
fn jump_to_round(instance: &mut Instance, round: Round) -> Vec<Output> {
    let already_requested = instance
        .state
        .round_change_container
        .messages_by_round(round)
        .iter()
        .any(|m| m.signers.contains(&instance.state.share.operator_id()));

    instance.state.round = round;
    info!(%round, "jumping to round on partial quorum");

    let mut outputs = vec![Output::ScheduleTimeout(round, round_timeout(&instance.timeout_params, round))];

    if !already_requested {
        let own = own_round_change_message(instance, round);
        instance.state.round_change_container.add(round, own.clone());
        outputs.push(Output::Broadcast(own));
    }

    outputs
}

/// This operator leads `round` and a full quorum has requested it:
/// re-propose, justified by the quorum itself and, if any signer had
/// prepared a value, by that value's own prepare quorum.
fn repropose(instance: &mut Instance, round: Round, quorum: &[SignedMessage]) -> Vec<Output> {
    let (value, prepare_justification) = match highest_prepared(quorum) {
        Some((prepared_round, prepared_value)) => {
            let justification = quorum
                .iter()
                .filter_map(|m| decode_round_change(&m.message.data).ok())
                .find(|d| d.prepared_round == Some(prepared_round) && d.prepared_value.as_ref() == Some(&prepared_value))
                .map(|d| d.prepare_justification)
                .unwrap_or_default();
            (prepared_value, justification)
        }
        None => (instance.input_value.clone(), Vec::new()),
    };

    let proposal = instance.sign_own(
        MsgType::Proposal,
        round,
        encode_proposal(&ProposalData {
            data: value,
            round_change_justification: quorum.to_vec(),
            prepare_justification,
        }),
    );

    instance.state.propose_container.add(round, proposal.clone());
    instance.state.proposal_accepted_for_current_round = Some(proposal.clone());

    vec![Output::Broadcast(proposal)]
}

fn own_round_change_message(instance: &Instance, round: Round) -> SignedMessage {
    let (prepared_round, prepared_value, prepare_justification) =
        match (instance.state.last_prepared_round, &instance.state.last_prepared_value) {
            (Some(pr), Some(pv)) => {
                let (_, quorum) = instance
                    .state
                    .prepare_container
                    .longest_unique_signers_for_round_and_value(pr, pv);
                (Some(pr), Some(pv.clone()), quorum)
            }
            _ => (None, None, Vec::new()),
        };

    instance.sign_own(
        MsgType::RoundChange,
        round,
        encode_round_change(&RoundChangeData {
            prepared_round,
            prepared_value,
            prepare_justification,
        }),
    )
}
