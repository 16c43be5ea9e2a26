use qbft_types::{Height, MessageId, Round, SignedMessage};

use crate::error::StoreError;

/// `version.0x01`: the only format emitted and understood today. A reader
/// encountering a different byte should treat the record as unreadable
/// rather than guess at a layout.
pub const CURRENT_VERSION: u8 = 0x01;

/// The persisted snapshot of a QBFT instance's containers, round-ordered as
/// required by §6 ("Containers serialize as round-ordered lists of signed
/// messages").
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct StoredState {
    pub id: MessageId,
    pub height: Height,
    pub round: Round,
    pub last_prepared_round: Option<Round>,
    pub last_prepared_value: Option<Vec<u8>>,
    pub proposal_accepted_for_current_round: Option<SignedMessage>,
    pub decided: bool,
    pub decided_value: Option<Vec<u8>>,
    pub propose_messages: Vec<(Round, Vec<SignedMessage>)>,
    pub prepare_messages: Vec<(Round, Vec<SignedMessage>)>,
    pub commit_messages: Vec<(Round, Vec<SignedMessage>)>,
    pub round_change_messages: Vec<(Round, Vec<SignedMessage>)>,
}

/// `{ State, DecidedMessage }` keyed by `(Identifier, Height)` (§3 "Stored
/// Instance").
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct StoredInstance {
    pub state: StoredState,
    pub decided_message: Option<SignedMessage>,
}

/// Canonical on-disk form: a single version byte followed by the borsh
/// encoding of the record (§6 "version byte prefix = 0x01").
pub fn encode(instance: &StoredInstance) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + 256);
    bytes.push(CURRENT_VERSION);
    bytes.extend(borsh::to_vec(instance).expect("StoredInstance encoding is infallible"));
    bytes
}

pub fn decode(bytes: &[u8]) -> Result<StoredInstance, StoreError> {
    let (version, rest) = bytes.split_first().ok_or(StoreError::EmptyRecord)?;
    if *version != CURRENT_VERSION {
        return Err(StoreError::UnsupportedVersion(*version));
    }
    Ok(borsh::from_slice(rest)?)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use qbft_types::{Message, MsgType, OperatorId, Role, Signature};

    use super::*;

    fn sample() -> StoredInstance {
        let id = MessageId::new(&[2u8; qbft_types::PUBKEY_LEN], Role::Proposer);
        let message = Message::new(MsgType::Commit, Height::ONE, Round::ONE, id, b"v".to_vec());
        let mut signers = BTreeSet::new();
        signers.insert(OperatorId::new(1));
        let signed = SignedMessage::new(message, signers, Signature(vec![9, 9]));

        StoredInstance {
            state: StoredState {
                id,
                height: Height::ONE,
                round: Round::ONE,
                last_prepared_round: Some(Round::ONE),
                last_prepared_value: Some(b"v".to_vec()),
                proposal_accepted_for_current_round: Some(signed.clone()),
                decided: true,
                decided_value: Some(b"v".to_vec()),
                propose_messages: vec![(Round::ONE, vec![signed.clone()])],
                prepare_messages: vec![(Round::ONE, vec![signed.clone()])],
                commit_messages: vec![(Round::ONE, vec![signed.clone()])],
                round_change_messages: Vec::new(),
            },
            decided_message: Some(signed),
        }
    }

    #[test]
    fn round_trips() {
        let original = sample();
        let decoded = decode(&encode(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = encode(&sample());
        bytes[0] = 0x02;
        assert!(matches!(decode(&bytes), Err(StoreError::UnsupportedVersion(0x02))));
    }

    #[test]
    fn rejects_empty_record() {
        assert!(matches!(decode(&[]), Err(StoreError::EmptyRecord)));
    }
}
