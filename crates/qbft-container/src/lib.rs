//! Indexed multimap of signed QBFT consensus messages by round, with
//! quorum detection and equivocation-evidence tracking (§4.1).

mod container;
mod evidence;

pub use container::MsgContainer;
pub use evidence::{EquivocationEvidence, EvidenceMap};
