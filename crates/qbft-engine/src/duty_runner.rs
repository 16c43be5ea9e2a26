use qbft_consensus::Controller;
use qbft_driver::Output;
use qbft_store::Store;
use qbft_types::{Height, Role, Round, SignedMessage};

use crate::error::DutyError;

/// One per role (§4.5): couples a [`Controller`] to the role's duties. The
/// post-decision signing pipeline itself lives outside this crate — callers
/// observe `Output::Decided` and drive it from there.
pub struct DutyRunner<S: Store> {
    role: Role,
    controller: Controller<S>,
}

impl<S: Store> DutyRunner<S> {
    pub fn new(role: Role, controller: Controller<S>) -> Self {
        Self { role, controller }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn has_running_duty(&self) -> bool {
        self.controller.is_running()
    }

    /// `(height, round)` of the live instance, used by the consumer loop to
    /// classify queue items; defaults to the first height/round before any
    /// duty has started.
    pub fn current_height_round(&self) -> (Height, Round) {
        match self.controller.live_state() {
            Some(state) => (state.height, state.round),
            None => (Height::ONE, Round::ONE),
        }
    }

    pub fn start_duty(&mut self, height: Height, input: Vec<u8>) -> Result<Vec<Output>, DutyError> {
        if self.has_running_duty() {
            return Err(DutyError::AlreadyRunning(self.role));
        }
        Ok(self.controller.start_new_instance(height, input)?)
    }

    pub fn process_message(&mut self, signed: SignedMessage) -> Result<Vec<Output>, DutyError> {
        Ok(self.controller.process_message(signed)?)
    }

    pub fn handle_timeout(&mut self, height: Height, round: Round) -> Result<Vec<Output>, DutyError> {
        Ok(self.controller.handle_timeout(height, round)?)
    }
}
