use qbft_types::{MessageId, OperatorId, Role, Share, PUBKEY_LEN};

/// A committee of `n` operators, `1..=n`.
pub fn committee(n: u64) -> Vec<OperatorId> {
    (1..=n).map(OperatorId::new).collect()
}

/// `operator`'s `Share` within a committee of `n`.
pub fn share(operator: u64, n: u64) -> Share {
    Share::new(OperatorId::new(operator), committee(n)).expect("fixture committee is well-formed")
}

/// One `Share` per operator in a committee of `n`, in operator order.
pub fn shares(n: u64) -> Vec<Share> {
    (1..=n).map(|operator| share(operator, n)).collect()
}

/// A deterministic identifier distinguished only by `tag`, for tests that
/// need several distinct validators/roles.
pub fn message_id(tag: u8) -> MessageId {
    MessageId::new(&[tag; PUBKEY_LEN], Role::Attester)
}
