use core::fmt;

/// A retry counter within a height.
///
/// Rounds start at 1 and only ever move forward for the local node within
/// one height (§3, "Rounds within a height are monotonically
/// non-decreasing for the local node").
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Round(u64);

impl Round {
    /// The first round of any height.
    pub const ONE: Self = Self(1);

    pub const fn new(round: u64) -> Self {
        Self(round)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Return the round following this one.
    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Round {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
