use std::collections::BTreeMap;

use qbft_types::{MsgType, OperatorId, Round, SignedMessage};

/// Two conflicting messages signed by the same operator for the same
/// `(round, msg_type)` — equivocation. Kept for reporting; never fatal to
/// the instance (§4.2 edge cases).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquivocationEvidence {
    pub signer: OperatorId,
    pub round: Round,
    pub msg_type: MsgType,
    pub first: SignedMessage,
    pub conflicting: SignedMessage,
}

/// Tracks, per `(round, msg_type, signer)`, the first message observed so
/// conflicting ones can be reported as [`EquivocationEvidence`].
#[derive(Clone, Debug, Default)]
pub struct EvidenceMap {
    first_seen: BTreeMap<(Round, MsgType, OperatorId), SignedMessage>,
    evidence: Vec<EquivocationEvidence>,
}

impl EvidenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `msg` for every one of its signers, returning evidence for
    /// any signer that had already signed a different message at the same
    /// `(round, msg_type)`.
    pub fn observe(&mut self, round: Round, msg_type: MsgType, msg: &SignedMessage) {
        for &signer in &msg.signers {
            let key = (round, msg_type, signer);
            match self.first_seen.get(&key) {
                None => {
                    self.first_seen.insert(key, msg.clone());
                }
                Some(first) if first.message.data != msg.message.data => {
                    self.evidence.push(EquivocationEvidence {
                        signer,
                        round,
                        msg_type,
                        first: first.clone(),
                        conflicting: msg.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    pub fn for_round(&self, round: Round) -> Vec<&EquivocationEvidence> {
        self.evidence.iter().filter(|e| e.round == round).collect()
    }

    pub fn all(&self) -> &[EquivocationEvidence] {
        &self.evidence
    }
}
