use std::collections::{BTreeMap, BTreeSet};

use qbft_types::{OperatorId, Round, Share, SignedMessage};
use tracing::trace;

use crate::evidence::{EquivocationEvidence, EvidenceMap};

/// An indexed multimap of signed consensus messages by round (§4.1).
///
/// Invariants maintained by this type:
/// - No two entries in the same round bucket share an identical
///   `(signers, data)` pair (idempotent insert).
/// - [`MsgContainer::longest_unique_signers_for_round_and_value`] returns
///   the longest subset of stored messages matching a value whose union of
///   signers is pairwise disjoint.
#[derive(Clone, Debug, Default)]
pub struct MsgContainer {
    by_round: BTreeMap<Round, Vec<SignedMessage>>,
    evidence: EvidenceMap,
}

impl MsgContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `msg` into the bucket for `round`. Idempotent on
    /// `(signers, data)`: a message with the same signer set and the same
    /// payload bytes as one already stored is dropped. Returns whether a
    /// new entry was stored.
    pub fn add(&mut self, round: Round, msg: SignedMessage) -> bool {
        let bucket = self.by_round.entry(round).or_default();

        let duplicate = bucket
            .iter()
            .any(|existing| existing.signers == msg.signers && existing.message.data == msg.message.data);

        if duplicate {
            trace!(%round, "dropping duplicate message, already stored");
            return false;
        }

        self.evidence.observe(round, msg.message.msg_type, &msg);
        bucket.push(msg);
        true
    }

    pub fn messages_by_round(&self, round: Round) -> &[SignedMessage] {
        self.by_round.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rounds(&self) -> impl Iterator<Item = Round> + '_ {
        self.by_round.keys().copied()
    }

    /// Greedily select, among the messages stored at `round` whose payload
    /// equals `value`, the longest run whose signer sets are pairwise
    /// disjoint. Ties are broken by insertion order: once a signer has
    /// contributed to the accumulated set, any later message from them is
    /// skipped (this is also how an equivocating signer only counts once
    /// toward quorum — §4.2 edge cases).
    pub fn longest_unique_signers_for_round_and_value(
        &self,
        round: Round,
        value: &[u8],
    ) -> (BTreeSet<OperatorId>, Vec<SignedMessage>) {
        let mut signers = BTreeSet::new();
        let mut selected = Vec::new();

        for msg in self.messages_by_round(round) {
            if msg.message.data != value {
                continue;
            }
            if msg.signers.is_disjoint(&signers) {
                signers.extend(msg.signers.iter().copied());
                selected.push(msg.clone());
            }
        }

        (signers, selected)
    }

    /// True iff the disjoint signer union for `(round, value)` reaches the
    /// committee's quorum threshold `Q`.
    pub fn has_quorum(&self, share: &Share, round: Round, value: &[u8]) -> bool {
        let (signers, _) = self.longest_unique_signers_for_round_and_value(round, value);
        signers.len() >= share.quorum()
    }

    /// True iff the disjoint signer union for `(round, value)` reaches the
    /// partial-quorum threshold `F + 1`.
    pub fn has_partial_quorum(&self, share: &Share, round: Round, value: &[u8]) -> bool {
        let (signers, _) = self.longest_unique_signers_for_round_and_value(round, value);
        signers.len() >= share.partial_quorum()
    }

    /// The union of signers across every message stored at `round`,
    /// regardless of payload. Used for RoundChange counting (§4.2), where
    /// messages legitimately carry different `prepared_value`s and so can't
    /// be grouped by an exact value match the way Prepare/Commit are.
    pub fn distinct_signers_for_round(&self, round: Round) -> BTreeSet<OperatorId> {
        self.messages_by_round(round)
            .iter()
            .flat_map(|m| m.signers.iter().copied())
            .collect()
    }

    /// The first `Q` stored messages for `round` whose signer sets are
    /// pairwise disjoint, ignoring payload — unlike
    /// [`MsgContainer::longest_unique_signers_for_round_and_value`], this
    /// does not require a common value, which is what RoundChange quorums
    /// need (§4.2: senders legitimately disagree on `prepared_value`).
    /// Returns `None` if no such subset reaches `Q`.
    pub fn distinct_signer_quorum_messages(&self, share: &Share, round: Round) -> Option<Vec<SignedMessage>> {
        let mut signers = BTreeSet::new();
        let mut selected = Vec::new();

        for msg in self.messages_by_round(round) {
            if msg.signers.is_disjoint(&signers) {
                signers.extend(msg.signers.iter().copied());
                selected.push(msg.clone());
            }
        }

        (signers.len() >= share.quorum()).then_some(selected)
    }

    /// True iff `Q` distinct operators have sent a message for `round`.
    pub fn has_distinct_signer_quorum(&self, share: &Share, round: Round) -> bool {
        self.distinct_signers_for_round(round).len() >= share.quorum()
    }

    /// True iff `F + 1` distinct operators have sent a message for `round`.
    pub fn has_distinct_signer_partial_quorum(&self, share: &Share, round: Round) -> bool {
        self.distinct_signers_for_round(round).len() >= share.partial_quorum()
    }

    pub fn evidence_for_round(&self, round: Round) -> Vec<&EquivocationEvidence> {
        self.evidence.for_round(round)
    }

    pub fn all_evidence(&self) -> &[EquivocationEvidence] {
        self.evidence.all()
    }
}

#[cfg(test)]
mod tests {
    use qbft_types::{Height, Message, MessageId, MsgType, Role, Signature};

    use super::*;

    fn msg(signers: &[u64], data: &[u8]) -> SignedMessage {
        let id = MessageId::new(&[1u8; 48], Role::Attester);
        let message = Message::new(MsgType::Prepare, Height::ONE, Round::ONE, id, data.to_vec());
        SignedMessage::new(
            message,
            signers.iter().copied().map(OperatorId::new).collect(),
            Signature(vec![]),
        )
    }

    fn share(n: u64) -> Share {
        Share::new(OperatorId::new(1), (1..=n).map(OperatorId::new).collect()).unwrap()
    }

    #[test]
    fn add_is_idempotent_on_signers_and_data() {
        let mut c = MsgContainer::new();
        assert!(c.add(Round::ONE, msg(&[1], b"v")));
        assert!(!c.add(Round::ONE, msg(&[1], b"v")));
        assert_eq!(c.messages_by_round(Round::ONE).len(), 1);
    }

    #[test]
    fn different_data_is_not_a_duplicate() {
        let mut c = MsgContainer::new();
        assert!(c.add(Round::ONE, msg(&[1], b"v1")));
        assert!(c.add(Round::ONE, msg(&[1], b"v2")));
        assert_eq!(c.messages_by_round(Round::ONE).len(), 2);
    }

    #[test]
    fn quorum_over_disjoint_signers() {
        let mut c = MsgContainer::new();
        c.add(Round::ONE, msg(&[1], b"v"));
        c.add(Round::ONE, msg(&[2], b"v"));
        c.add(Round::ONE, msg(&[3], b"v"));

        let s = share(4);
        assert!(c.has_quorum(&s, Round::ONE, b"v"));
        assert!(!c.has_quorum(&s, Round::ONE, b"other"));
    }

    #[test]
    fn overlapping_signer_sets_only_count_once() {
        let mut c = MsgContainer::new();
        c.add(Round::ONE, msg(&[1, 2], b"v"));
        c.add(Round::ONE, msg(&[2, 3], b"v"));

        let (signers, selected) = c.longest_unique_signers_for_round_and_value(Round::ONE, b"v");
        assert_eq!(signers.len(), 2);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn equivocation_is_recorded_but_not_fatal() {
        let mut c = MsgContainer::new();
        c.add(Round::ONE, msg(&[1], b"v1"));
        c.add(Round::ONE, msg(&[1], b"v2"));

        assert_eq!(c.evidence_for_round(Round::ONE).len(), 1);
        assert_eq!(c.messages_by_round(Round::ONE).len(), 2);
    }
}
