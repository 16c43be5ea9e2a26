use qbft_types::{CommitData, MsgType, SignedMessage};

use crate::error::ValidationError;
use crate::instance::Instance;
use crate::output::Output;
use crate::payload::{decode_prepare, encode_commit};

/// §4.2 "Prepare": once `Q` distinct signers have prepared the same value
/// in the current round, broadcast this operator's own Commit for it. Only
/// fires once per round.
pub fn handle(instance: &mut Instance, msg: SignedMessage) -> Result<Vec<Output>, ValidationError> {
    let round = msg.message.round;

    let prepare_data = decode_prepare(&msg.message.data)?;
    instance.state.prepare_container.add(round, msg);

    // Past- and future-round prepares are stored above (needed as
    // justifications) but only the instance's current round drives state.
    if round != instance.state.round || instance.state.decided {
        return Ok(Vec::new());
    }

    if instance.state.last_prepared_round == Some(round) {
        return Ok(Vec::new());
    }

    if !instance
        .state
        .prepare_container
        .has_quorum(&instance.state.share, round, &prepare_data.data)
    {
        return Ok(Vec::new());
    }

    instance.state.last_prepared_round = Some(round);
    instance.state.last_prepared_value = Some(prepare_data.data.clone());

    let commit = instance.sign_own(
        MsgType::Commit,
        round,
        encode_commit(&CommitData {
            data: prepare_data.data,
        }),
    );
    instance.state.commit_container.add(round, commit.clone());

    Ok(vec![Output::Broadcast(commit)])
}
