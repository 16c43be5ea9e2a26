//! Core data types shared across the QBFT consensus workspace: identifiers,
//! heights, rounds, committee shares, messages and their typed payloads.

mod error;
mod height;
mod message;
mod message_id;
mod round;
mod share;
mod signed_message;
mod signing;

pub use error::TypesError;
pub use height::Height;
pub use message::{CommitData, Message, MsgType, PrepareData, ProposalData, RoundChangeData};
pub use message_id::{MessageId, Role, MESSAGE_ID_LEN, PUBKEY_LEN};
pub use round::Round;
pub use share::{OperatorId, Share};
pub use signed_message::{Signature, SignedMessage};
pub use signing::SignatureOracle;
