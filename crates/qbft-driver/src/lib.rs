//! The QBFT instance state machine: Propose/Prepare/Commit/RoundChange
//! transitions for one `(validator, role, height)` consensus run (§4).
//!
//! An [`Instance`] never performs I/O. It consumes [`qbft_types::SignedMessage`]s
//! and round-timer ticks, and emits [`Output`]s for its caller to act on.

mod error;
mod handle;
mod instance;
mod justification;
mod leader;
mod output;
mod payload;
mod state;
mod timeout;

pub use error::ValidationError;
pub use instance::Instance;
pub use leader::{is_local_leader, leader};
pub use output::{Decided, Output};
pub use state::State;
pub use timeout::{round_timeout, TimeoutParams};

pub use qbft_types::Height;
