//! The Controller (§4.3): owns the live QBFT instance for one identifier,
//! starts new heights, routes inbound messages to it, and persists the
//! stored instance once it decides.

mod controller;
mod error;
mod persist;

pub use controller::{Controller, INSTANCE_PREFIX};
pub use error::{ControllerError, StateError};
pub use persist::stored_instance;
