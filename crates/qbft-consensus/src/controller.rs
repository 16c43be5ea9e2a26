use std::sync::Arc;

use qbft_driver::{Instance, Output, TimeoutParams};
use qbft_store::Store;
use qbft_types::{Height, Message, MessageId, MsgType, Round, Share, SignatureOracle, SignedMessage};
use tracing::{debug, info, warn};

use crate::error::{ControllerError, StateError};
use crate::persist::stored_instance;

/// The collection name stored instances live under (§6 "Key layout").
pub const INSTANCE_PREFIX: &str = "qbft-instances";

/// Owns at most one live [`Instance`] for one identifier (§4.3): starts new
/// heights, routes inbound messages to the live instance, and persists the
/// stored instance once it decides.
pub struct Controller<S: Store> {
    id: MessageId,
    share: Share,
    oracle: Arc<dyn SignatureOracle>,
    timeout_params: TimeoutParams,
    store: Arc<S>,
    started_height: Option<Height>,
    live: Option<Instance>,
}

impl<S: Store> Controller<S> {
    pub fn new(
        id: MessageId,
        share: Share,
        oracle: Arc<dyn SignatureOracle>,
        timeout_params: TimeoutParams,
        store: Arc<S>,
    ) -> Self {
        Self {
            id,
            share,
            oracle,
            timeout_params,
            store,
            started_height: None,
            live: None,
        }
    }

    pub fn started_height(&self) -> Option<Height> {
        self.started_height
    }

    pub fn is_running(&self) -> bool {
        self.live.is_some()
    }

    /// The live instance's state, if one is running — used by the engine
    /// layer to classify queue items by the instance's current round.
    pub fn live_state(&self) -> Option<&qbft_driver::State> {
        self.live.as_ref().map(Instance::state)
    }

    /// §4.3 `StartNewInstance`: fails if an instance at `>= height` has
    /// already been started.
    pub fn start_new_instance(&mut self, height: Height, value: Vec<u8>) -> Result<Vec<Output>, ControllerError> {
        if let Some(started) = self.started_height {
            if height <= started {
                return Err(StateError::HeightNotAdvancing {
                    started,
                    requested: height,
                }
                .into());
            }
        }

        info!(%height, "starting new instance");
        let mut instance = Instance::new(
            self.share.clone(),
            self.id,
            height,
            self.oracle.clone(),
            self.timeout_params,
        );
        let outputs = instance.start(value);
        self.started_height = Some(height);
        self.live = Some(instance);

        self.absorb(outputs)
    }

    /// §4.3 `ProcessMessage`: routes to the live instance if its height
    /// matches. Future heights are dropped — the authoritative duty
    /// scheduler is responsible for starting them. Past heights are
    /// discarded unless they carry a decided-quorum Commit for a stored
    /// instance, in which case they update that instance's stored decided
    /// message.
    pub fn process_message(&mut self, signed: SignedMessage) -> Result<Vec<Output>, ControllerError> {
        let Some(instance) = &mut self.live else {
            return Err(StateError::NotStarted.into());
        };
        let live_height = instance.state().height;

        if signed.message.height > live_height {
            debug!(
                message_height = %signed.message.height,
                live_height = %live_height,
                "dropping message for a future height"
            );
            return Ok(Vec::new());
        }

        if signed.message.height < live_height {
            return self.update_decided_from_past_height(signed);
        }

        let outputs = match instance.handle_message(signed) {
            Ok(outputs) => outputs,
            Err(err) => {
                warn!(%err, "rejected inbound message");
                Vec::new()
            }
        };

        self.absorb(outputs)
    }

    /// A Commit whose own signer set already reaches `Q` is a
    /// self-certifying decided-quorum proof: if a stored instance exists at
    /// `signed`'s height, replace its decided message with this one. Any
    /// other past-height message, or one with no stored instance to update,
    /// is silently discarded.
    fn update_decided_from_past_height(&mut self, signed: SignedMessage) -> Result<Vec<Output>, ControllerError> {
        if signed.message.msg_type != MsgType::Commit || signed.signers.len() < self.share.quorum() {
            return Ok(Vec::new());
        }
        let signers: Vec<_> = signed.signers.iter().copied().collect();
        if !self.oracle.verify(&signed.message.data, &signers, &signed.signature) {
            warn!(height = %signed.message.height, "rejected past-height commit with a bad signature");
            return Ok(Vec::new());
        }

        let key = qbft_store::instance_key(&self.id, signed.message.height);
        let Some(raw) = self.store.get(INSTANCE_PREFIX, &key)? else {
            return Ok(Vec::new());
        };

        let mut record = qbft_store::decode(&raw)?;
        info!(height = %signed.message.height, "updating stored decided message from a past-height commit");
        record.decided_message = Some(signed);
        self.store.set(INSTANCE_PREFIX, &key, qbft_store::encode(&record))?;

        Ok(Vec::new())
    }

    /// A round timer fired for `(height, round)`. No-op if it isn't the
    /// live instance's height.
    pub fn handle_timeout(&mut self, height: Height, round: Round) -> Result<Vec<Output>, ControllerError> {
        let Some(instance) = &mut self.live else {
            return Ok(Vec::new());
        };
        if instance.state().height != height {
            return Ok(Vec::new());
        }

        let outputs = instance.handle_timeout(round);
        self.absorb(outputs)
    }

    /// Persist on `Decided`, then transition the live instance out so a new
    /// height may start; every other output passes through untouched.
    fn absorb(&mut self, outputs: Vec<Output>) -> Result<Vec<Output>, ControllerError> {
        let mut passthrough = Vec::with_capacity(outputs.len());

        for output in outputs {
            if let Output::Decided(decided) = &output {
                if let Some(instance) = &self.live {
                    let decided_message = SignedMessage::new(
                        Message::new(MsgType::Commit, decided.height, decided.round, decided.identifier, decided.value.clone()),
                        decided.signers.clone(),
                        decided.signature.clone(),
                    );
                    let record = stored_instance(instance.state(), decided_message);
                    let key = qbft_store::instance_key(&self.id, decided.height);
                    self.store.set(INSTANCE_PREFIX, &key, qbft_store::encode(&record))?;
                }
                self.live = None;
            }
            passthrough.push(output);
        }

        Ok(passthrough)
    }
}
