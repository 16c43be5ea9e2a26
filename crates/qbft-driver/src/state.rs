use qbft_container::MsgContainer;
use qbft_types::{Height, MessageId, Round, Share, SignedMessage};

/// A QBFT instance's mutable record for one height (§3).
///
/// Created when the owning [`crate::Instance`] is started and mutated only
/// by that instance. `height` never changes; `round` only moves forward;
/// `decided` only transitions `false -> true`.
#[derive(Clone, Debug)]
pub struct State {
    pub share: Share,
    pub id: MessageId,
    pub height: Height,
    pub round: Round,
    pub last_prepared_round: Option<Round>,
    pub last_prepared_value: Option<Vec<u8>>,
    pub proposal_accepted_for_current_round: Option<SignedMessage>,
    pub decided: bool,
    pub decided_value: Option<Vec<u8>>,
    pub propose_container: MsgContainer,
    pub prepare_container: MsgContainer,
    pub commit_container: MsgContainer,
    pub round_change_container: MsgContainer,
}

impl State {
    pub fn new(share: Share, id: MessageId, height: Height) -> Self {
        Self {
            share,
            id,
            height,
            round: Round::ONE,
            last_prepared_round: None,
            last_prepared_value: None,
            proposal_accepted_for_current_round: None,
            decided: false,
            decided_value: None,
            propose_container: MsgContainer::new(),
            prepare_container: MsgContainer::new(),
            commit_container: MsgContainer::new(),
            round_change_container: MsgContainer::new(),
        }
    }

    pub fn container_for(&self, msg_type: qbft_types::MsgType) -> &MsgContainer {
        match msg_type {
            qbft_types::MsgType::Proposal => &self.propose_container,
            qbft_types::MsgType::Prepare => &self.prepare_container,
            qbft_types::MsgType::Commit => &self.commit_container,
            qbft_types::MsgType::RoundChange => &self.round_change_container,
        }
    }
}
