use qbft_types::SignedMessage;
use tracing::info;

use crate::error::ValidationError;
use crate::instance::Instance;
use crate::output::{Decided, Output};
use crate::payload::decode_commit;

/// §4.2 "Commit": once `Q` distinct signers have committed the same value
/// for any round, the instance is decided — a decision can arrive for a
/// round other than the instance's current one (§4.2 "Decided before
/// prepare" edge case), so this handler does not gate on `round ==
/// state.round` the way Prepare does.
pub fn handle(instance: &mut Instance, msg: SignedMessage) -> Result<Vec<Output>, ValidationError> {
    let round = msg.message.round;
    let commit_data = decode_commit(&msg.message.data)?;
    instance.state.commit_container.add(round, msg);

    if instance.state.decided {
        return Ok(Vec::new());
    }

    if !instance
        .state
        .commit_container
        .has_quorum(&instance.state.share, round, &commit_data.data)
    {
        return Ok(Vec::new());
    }

    let (signers, quorum) = instance
        .state
        .commit_container
        .longest_unique_signers_for_round_and_value(round, &commit_data.data);
    let signature = instance.aggregate(&quorum);

    instance.state.decided = true;
    instance.state.decided_value = Some(commit_data.data.clone());
    info!(%round, "instance decided");

    Ok(vec![Output::Decided(Decided {
        identifier: instance.state.id,
        height: instance.state.height,
        round,
        value: commit_data.data,
        signers,
        signature,
    })])
}
