use core::fmt;

use crate::error::TypesError;

/// Length in bytes of a BLS12-381 G1 public key, as used to identify a
/// validator.
pub const PUBKEY_LEN: usize = 48;

/// Total length of an opaque [`MessageId`].
pub const MESSAGE_ID_LEN: usize = 56;

/// The duty role a consensus instance is running for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum Role {
    Attester = 0,
    Proposer = 1,
    Aggregator = 2,
    SyncCommittee = 3,
    SyncCommitteeContribution = 4,
}

impl Role {
    const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Attester),
            1 => Some(Self::Proposer),
            2 => Some(Self::Aggregator),
            3 => Some(Self::SyncCommittee),
            4 => Some(Self::SyncCommitteeContribution),
            _ => None,
        }
    }

    const fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Attester => "attester",
            Role::Proposer => "proposer",
            Role::Aggregator => "aggregator",
            Role::SyncCommittee => "sync-committee",
            Role::SyncCommitteeContribution => "sync-committee-contribution",
        };
        f.write_str(name)
    }
}

/// A 56-byte opaque identifier: a 48-byte validator public key plus a
/// 1-byte role tag. The remaining 7 bytes are reserved and currently
/// always zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct MessageId([u8; MESSAGE_ID_LEN]);

impl MessageId {
    /// Build a `MessageId` from a validator public key and a role.
    pub fn new(pubkey: &[u8; PUBKEY_LEN], role: Role) -> Self {
        let mut bytes = [0u8; MESSAGE_ID_LEN];
        bytes[..PUBKEY_LEN].copy_from_slice(pubkey);
        bytes[PUBKEY_LEN] = role.tag();
        Self(bytes)
    }

    /// Parse a `MessageId` from its 56-byte wire representation.
    pub fn from_bytes(bytes: [u8; MESSAGE_ID_LEN]) -> Result<Self, TypesError> {
        Role::from_tag(bytes[PUBKEY_LEN]).ok_or(TypesError::UnknownRole(bytes[PUBKEY_LEN]))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; MESSAGE_ID_LEN] {
        &self.0
    }

    pub fn public_key(&self) -> &[u8; PUBKEY_LEN] {
        self.0[..PUBKEY_LEN].try_into().unwrap()
    }

    pub fn role(&self) -> Role {
        Role::from_tag(self.0[PUBKEY_LEN]).expect("validated in from_bytes/new")
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageId")
            .field("pubkey", &hex_prefix(self.public_key()))
            .field("role", &self.role())
            .finish()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", hex_prefix(self.public_key()), self.role())
    }
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(4)
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_role() {
        let id = MessageId::new(&[7u8; PUBKEY_LEN], Role::Proposer);
        assert_eq!(id.role(), Role::Proposer);
        assert_eq!(id.public_key(), &[7u8; PUBKEY_LEN]);
    }

    #[test]
    fn rejects_unknown_role_tag() {
        let mut bytes = [0u8; MESSAGE_ID_LEN];
        bytes[PUBKEY_LEN] = 200;
        assert!(matches!(
            MessageId::from_bytes(bytes),
            Err(TypesError::UnknownRole(200))
        ));
    }
}
