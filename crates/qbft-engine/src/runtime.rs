use std::collections::HashMap;
use std::sync::Arc;

use qbft_driver::Output;
use qbft_store::Store;
use qbft_types::{Height, Role, Round, SignedMessage};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::duty_runner::DutyRunner;
use crate::error::StartDutyError;
use crate::queue::{PriorityQueue, QueueItem};

/// §4.6: only `Started` accepts inbound messages and timer events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Started,
    Stopped,
}

/// Composes the per-role [`DutyRunner`]s for one validator (§4.6). Each
/// role's queue is drained by its own consumer task, spawned with
/// [`ValidatorRuntime::spawn_consumers`]; the runtime itself only gates
/// `start_duty`/`on_timeout` on `run_state`.
pub struct ValidatorRuntime<S: Store> {
    run_state: RunState,
    queues: HashMap<Role, Arc<PriorityQueue>>,
    runners: HashMap<Role, Arc<std::sync::Mutex<DutyRunner<S>>>>,
}

impl<S: Store + 'static> ValidatorRuntime<S> {
    pub fn new(runners: Vec<DutyRunner<S>>, queue_capacity: usize) -> Self {
        let mut queues = HashMap::new();
        let mut wrapped = HashMap::new();
        for runner in runners {
            let role = runner.role();
            queues.insert(role, Arc::new(PriorityQueue::new(queue_capacity)));
            wrapped.insert(role, Arc::new(std::sync::Mutex::new(runner)));
        }
        Self {
            run_state: RunState::NotStarted,
            queues,
            runners: wrapped,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn start(&mut self) {
        self.run_state = RunState::Started;
    }

    pub fn stop(&mut self) {
        self.run_state = RunState::Stopped;
    }

    pub fn start_duty(&mut self, role: Role, height: Height, input: Vec<u8>) -> Result<Vec<Output>, StartDutyError> {
        if self.run_state != RunState::Started {
            return Err(StartDutyError::NotRunning);
        }
        let runner = self.runners.get(&role).ok_or(StartDutyError::UnknownRole(role))?;
        let mut runner = runner.lock().expect("duty runner lock poisoned");
        Ok(runner.start_duty(height, input)?)
    }

    /// Enqueue `signed` for `role`'s consumer; dropped rather than processed
    /// inline if the runtime is not `Started`.
    pub fn route_message(&self, role: Role, signed: SignedMessage) {
        if self.run_state != RunState::Started {
            return;
        }
        if let Some(queue) = self.queues.get(&role) {
            if !queue.try_push(QueueItem::Message(signed)) {
                warn!(?role, "inbound queue full, dropping message");
            }
        }
    }

    /// §4.6 `OnTimeout`, refined per the supplement that gates firing on
    /// run-state and on a currently running duty: a timer that outlives its
    /// duty or the runtime's lifetime is a no-op, not an enqueued event.
    pub fn on_timeout(&self, role: Role, height: Height, round: Round) {
        if self.run_state != RunState::Started {
            return;
        }
        let Some(runner) = self.runners.get(&role) else {
            return;
        };
        if !runner.lock().expect("duty runner lock poisoned").has_running_duty() {
            return;
        }
        if let Some(queue) = self.queues.get(&role) {
            if !queue.try_push(QueueItem::Timeout { height, round }) {
                warn!(?role, "inbound queue full, dropping timeout");
            }
        }
    }

    /// Spawn one consumer task per role, draining its queue into its
    /// [`DutyRunner`] until `shutdown` is notified (§5 "stopping the runtime
    /// cancels all consumer tasks"). Produced [`Output`]s are forwarded to
    /// `outputs` tagged with their role.
    pub fn spawn_consumers(
        &self,
        outputs: mpsc::UnboundedSender<(Role, Output)>,
        shutdown: Arc<Notify>,
    ) -> Vec<JoinHandle<()>> {
        self.queues
            .iter()
            .map(|(role, queue)| {
                let role = *role;
                let queue = Arc::clone(queue);
                let runner = Arc::clone(&self.runners[&role]);
                let outputs = outputs.clone();
                let shutdown = Arc::clone(&shutdown);
                tokio::spawn(async move { consume(role, runner, queue, outputs, shutdown).await })
            })
            .collect()
    }
}

async fn consume<S: Store>(
    role: Role,
    runner: Arc<std::sync::Mutex<DutyRunner<S>>>,
    queue: Arc<PriorityQueue>,
    outputs: mpsc::UnboundedSender<(Role, Output)>,
    shutdown: Arc<Notify>,
) {
    loop {
        let (height, round) = runner.lock().expect("duty runner lock poisoned").current_height_round();

        let item = tokio::select! {
            _ = shutdown.notified() => return,
            item = queue.pop(height, round) => item,
        };

        let produced = {
            let mut runner = runner.lock().expect("duty runner lock poisoned");
            let result = match item {
                QueueItem::Timeout { height, round } => runner.handle_timeout(height, round),
                QueueItem::Message(signed) => runner.process_message(signed),
            };
            match result {
                Ok(outputs) => outputs,
                Err(err) => {
                    warn!(?role, %err, "duty runner rejected queue item");
                    Vec::new()
                }
            }
        };

        for output in produced {
            if outputs.send((role, output)).is_err() {
                return;
            }
        }
    }
}
