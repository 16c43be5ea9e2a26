use qbft_types::{MsgType, RoundChangeData};
use tracing::info;

use crate::instance::Instance;
use crate::output::Output;
use crate::payload::encode_round_change;
use crate::timeout::round_timeout;

/// §4.2 "Timeout": if the fired round is still the instance's current
/// round, move to the next one and announce it, carrying the best
/// prepared value this operator has so far. A timer for a round the
/// instance has already left is stale and ignored.
pub fn handle(instance: &mut Instance, round: qbft_types::Round) -> Vec<Output> {
    if round != instance.state.round || instance.state.decided {
        return Vec::new();
    }

    let next_round = instance.state.round.increment();
    instance.state.round = next_round;
    info!(round = %next_round, "round timed out, requesting round change");

    let quorum = match (&instance.state.last_prepared_round, &instance.state.last_prepared_value) {
        (Some(pr), Some(pv)) => {
            instance
                .state
                .prepare_container
                .longest_unique_signers_for_round_and_value(*pr, pv)
                .1
        }
        _ => Vec::new(),
    };

    let round_change = instance.sign_own(
        MsgType::RoundChange,
        next_round,
        encode_round_change(&RoundChangeData {
            prepared_round: instance.state.last_prepared_round,
            prepared_value: instance.state.last_prepared_value.clone(),
            prepare_justification: quorum,
        }),
    );
    instance.state.round_change_container.add(next_round, round_change.clone());

    vec![
        Output::Broadcast(round_change),
        Output::ScheduleTimeout(next_round, round_timeout(&instance.timeout_params, next_round)),
    ]
}
