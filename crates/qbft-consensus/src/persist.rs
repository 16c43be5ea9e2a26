use qbft_container::MsgContainer;
use qbft_driver::State;
use qbft_store::{StoredInstance, StoredState};
use qbft_types::{Round, SignedMessage};

fn round_ordered(container: &MsgContainer) -> Vec<(Round, Vec<SignedMessage>)> {
    container
        .rounds()
        .map(|round| (round, container.messages_by_round(round).to_vec()))
        .collect()
}

/// Build the persisted record for a decided instance (§3 "Stored
/// Instance"). Only called once an instance has decided, so `decided`/
/// `decided_value` on `state` are always populated.
pub fn stored_instance(state: &State, decided_message: SignedMessage) -> StoredInstance {
    StoredInstance {
        state: StoredState {
            id: state.id,
            height: state.height,
            round: state.round,
            last_prepared_round: state.last_prepared_round,
            last_prepared_value: state.last_prepared_value.clone(),
            proposal_accepted_for_current_round: state.proposal_accepted_for_current_round.clone(),
            decided: state.decided,
            decided_value: state.decided_value.clone(),
            propose_messages: round_ordered(&state.propose_container),
            prepare_messages: round_ordered(&state.prepare_container),
            commit_messages: round_ordered(&state.commit_container),
            round_change_messages: round_ordered(&state.round_change_container),
        },
        decided_message: Some(decided_message),
    }
}
