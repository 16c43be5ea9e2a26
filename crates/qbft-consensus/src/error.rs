use qbft_types::Height;
use thiserror::Error;

/// §7 `StateError`: surfaced to the duty scheduler, never to the wire.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("height {requested} is not greater than the already-started height {started}")]
    HeightNotAdvancing { started: Height, requested: Height },

    #[error("no instance is running for this identifier")]
    NotStarted,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Storage(#[from] qbft_store::StoreError),
}
