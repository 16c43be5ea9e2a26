use core::fmt;

/// A QBFT instance index, one per duty.
///
/// Heights start at 1, per the "first height" convention: a height of 0
/// never occurs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Height(u64);

impl Height {
    /// The first height of a chain of duties.
    pub const ONE: Self = Self(1);

    /// Create a height from its raw counter. The caller is responsible for
    /// never passing 0.
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Return the next height.
    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Height {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
