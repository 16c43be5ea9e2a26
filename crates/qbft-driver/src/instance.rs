use std::collections::BTreeSet;
use std::sync::Arc;

use qbft_types::{Message, MessageId, MsgType, OperatorId, Round, Share, Signature, SignedMessage};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::leader::is_local_leader;
use crate::output::Output;
use crate::payload::encode_proposal;
use crate::state::State;
use crate::timeout::{round_timeout, TimeoutParams};
use crate::{handle, Height};
use qbft_types::SignatureOracle;

/// One QBFT consensus run for one `(validator, role, height)` (§4.2).
///
/// Validates inbound messages, drives the Propose/Prepare/Commit/
/// RoundChange transitions, and emits outbound [`Output`]s instead of
/// performing I/O directly.
pub struct Instance {
    pub(crate) state: State,
    pub(crate) oracle: Arc<dyn SignatureOracle>,
    pub(crate) timeout_params: TimeoutParams,
    pub(crate) input_value: Vec<u8>,
}

impl Instance {
    pub fn new(
        share: Share,
        id: MessageId,
        height: Height,
        oracle: Arc<dyn SignatureOracle>,
        timeout_params: TimeoutParams,
    ) -> Self {
        Self {
            state: State::new(share, id, height),
            oracle,
            timeout_params,
            input_value: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Start this instance with `value` as the input to agree on. Sets
    /// `Round = 1`; if the local node leads round 1, broadcasts a
    /// Proposal with empty justifications. Always arms the round-1 timer.
    pub fn start(&mut self, value: Vec<u8>) -> Vec<Output> {
        info!(height = %self.state.height, "starting instance");

        self.input_value = value.clone();
        self.state.round = Round::ONE;

        let mut outputs = Vec::new();

        if is_local_leader(self.state.height, Round::ONE, &self.state.share) {
            let proposal_data = qbft_types::ProposalData {
                data: value,
                round_change_justification: Vec::new(),
                prepare_justification: Vec::new(),
            };
            outputs.push(Output::Broadcast(self.sign_own(
                MsgType::Proposal,
                Round::ONE,
                encode_proposal(&proposal_data),
            )));
        }

        outputs.push(Output::ScheduleTimeout(
            Round::ONE,
            round_timeout(&self.timeout_params, Round::ONE),
        ));

        outputs
    }

    /// Process an inbound message. Rejects (without mutating state) any
    /// message for a different height or identifier (§4.2 "Inbound
    /// processing"). Once decided, further messages are accepted but no
    /// longer drive transitions.
    pub fn handle_message(&mut self, msg: SignedMessage) -> Result<Vec<Output>, ValidationError> {
        if msg.message.height != self.state.height {
            return Err(ValidationError::WrongHeight {
                expected: self.state.height,
                actual: msg.message.height,
            });
        }
        if msg.message.identifier != self.state.id {
            return Err(ValidationError::WrongIdentifier {
                expected: self.state.id,
                actual: msg.message.identifier,
            });
        }
        if !msg.signers.iter().all(|s| self.state.share.is_member(*s)) {
            return Err(ValidationError::NotInCommittee);
        }
        let signers: Vec<OperatorId> = msg.signers.iter().copied().collect();
        if !self.oracle.verify(&msg.message.data, &signers, &msg.signature) {
            return Err(ValidationError::BadSignature);
        }

        if self.state.decided {
            debug!("instance already decided, message stored but ignored as a driver");
            return Ok(Vec::new());
        }

        match msg.message.msg_type {
            MsgType::Proposal => handle::proposal::handle(self, msg),
            MsgType::Prepare => handle::prepare::handle(self, msg),
            MsgType::Commit => handle::commit::handle(self, msg),
            MsgType::RoundChange => handle::round_change::handle(self, msg),
        }
    }

    /// A round timer fired. No-op if the instance has since decided or
    /// moved past `round` (§4.2 "Timeout").
    pub fn handle_timeout(&mut self, round: Round) -> Vec<Output> {
        handle::timeout::handle(self, round)
    }

    /// Sign `data` as this operator's own contribution and wrap it in a
    /// fresh [`SignedMessage`] for `msg_type`/`round`.
    pub(crate) fn sign_own(&self, msg_type: MsgType, round: Round, data: Vec<u8>) -> SignedMessage {
        let message = Message::new(msg_type, self.state.height, round, self.state.id, data);
        let signature = self.oracle.sign(&message.data);
        let mut signers = BTreeSet::new();
        signers.insert(self.state.share.operator_id());
        SignedMessage::new(message, signers, signature)
    }

    /// Aggregate the signatures of `quorum` into one signature attributed
    /// to the union of their signers, as required when assembling a
    /// composite Commit or RoundChange message (§4.2).
    pub(crate) fn aggregate(&self, quorum: &[SignedMessage]) -> Signature {
        let parts: Vec<(OperatorId, Signature)> = quorum
            .iter()
            .filter_map(|m| m.signers.iter().next().map(|s| (*s, m.signature.clone())))
            .collect();
        self.oracle.aggregate(&parts)
    }
}
