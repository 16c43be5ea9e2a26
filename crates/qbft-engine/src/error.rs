use qbft_types::Role;
use thiserror::Error;

/// §4.5 `StartDuty` failure: a duty is already running for this role at a
/// height that hasn't decided yet.
#[derive(Debug, Error)]
pub enum DutyError {
    #[error("a duty is already running for role {0}")]
    AlreadyRunning(Role),

    #[error(transparent)]
    Controller(#[from] qbft_consensus::ControllerError),
}

/// §4.6: one error type covering every reason `ValidatorRuntime::start_duty`
/// can be rejected, so callers driving many operators handle a single type
/// rather than multiplexing per-operator error kinds.
#[derive(Debug, Error)]
pub enum StartDutyError {
    #[error("validator runtime is not in the Started run-state")]
    NotRunning,

    #[error("no duty runner is registered for role {0}")]
    UnknownRole(Role),

    #[error(transparent)]
    Duty(#[from] DutyError),
}
