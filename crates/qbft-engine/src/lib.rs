//! Task/actor orchestration around the QBFT core (§4.4–§4.7): the bounded
//! priority queue, the per-instance round timer, the duty runner, and the
//! validator runtime that composes them.

mod config;
mod duty_runner;
mod error;
mod queue;
mod runtime;
mod timer;

pub use config::EngineConfig;
pub use duty_runner::DutyRunner;
pub use error::{DutyError, StartDutyError};
pub use queue::{PriorityQueue, QueueItem};
pub use runtime::{RunState, ValidatorRuntime};
pub use timer::{Msg as TimerMsg, Timer, TimeoutFired, TimerActorRef};
