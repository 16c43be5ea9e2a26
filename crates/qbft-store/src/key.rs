use qbft_types::{Height, MessageId};

/// `<identifier-bytes>/<height-big-endian-u64>`, matching the original's
/// `storage/kv/badger.go` key convention (§6 "Key layout"). The collection
/// name itself is passed separately as the `prefix` argument to [`crate::Store`]
/// methods, so it is not part of this key.
pub fn instance_key(identifier: &MessageId, height: Height) -> Vec<u8> {
    let mut key = Vec::with_capacity(qbft_types::MESSAGE_ID_LEN + 8);
    key.extend_from_slice(identifier.as_bytes());
    key.extend_from_slice(&height.as_u64().to_be_bytes());
    key
}

#[cfg(test)]
mod tests {
    use qbft_types::Role;

    use super::*;

    #[test]
    fn keys_for_different_heights_are_ordered() {
        let id = MessageId::new(&[1u8; qbft_types::PUBKEY_LEN], Role::Attester);
        let low = instance_key(&id, Height::new(1));
        let high = instance_key(&id, Height::new(2));
        assert!(low < high);
    }
}
