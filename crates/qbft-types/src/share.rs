use core::fmt;

use crate::error::TypesError;

/// A 1-based operator identifier within a committee.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct OperatorId(u64);

impl OperatorId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OperatorId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The local operator's committee membership snapshot for one validator.
///
/// `committee` has `3F + 1` members; `quorum` is `2F + 1` and
/// `partial_quorum` is `F + 1`, per §3.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Share {
    operator_id: OperatorId,
    committee: Vec<OperatorId>,
    quorum: usize,
    partial_quorum: usize,
}

impl Share {
    /// Build a `Share` from an ordered committee and this operator's id
    /// within it. `committee.len()` must equal `3F + 1` for some `F >= 0`;
    /// otherwise `quorum`/`partial_quorum` are computed from the nearest
    /// BFT bound and may not match the intended fault tolerance.
    pub fn new(operator_id: OperatorId, committee: Vec<OperatorId>) -> Result<Self, TypesError> {
        if committee.is_empty() {
            return Err(TypesError::EmptyCommittee);
        }
        if !committee.contains(&operator_id) {
            return Err(TypesError::NotInCommittee(operator_id));
        }

        let n = committee.len();
        let f = (n - 1) / 3;
        let quorum = 2 * f + 1;
        let partial_quorum = f + 1;

        Ok(Self {
            operator_id,
            committee,
            quorum,
            partial_quorum,
        })
    }

    pub fn operator_id(&self) -> OperatorId {
        self.operator_id
    }

    pub fn committee(&self) -> &[OperatorId] {
        &self.committee
    }

    pub fn committee_size(&self) -> usize {
        self.committee.len()
    }

    /// `Q`, the quorum threshold.
    pub fn quorum(&self) -> usize {
        self.quorum
    }

    /// `F + 1`, the partial-quorum (evidence) threshold.
    pub fn partial_quorum(&self) -> usize {
        self.partial_quorum
    }

    pub fn is_member(&self, operator: OperatorId) -> bool {
        self.committee.contains(&operator)
    }

    /// The 1-based index of `operator` within the committee order, used by
    /// the leader-election formula.
    pub fn committee_index(&self, operator: OperatorId) -> Option<usize> {
        self.committee.iter().position(|&o| o == operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committee(n: u64) -> Vec<OperatorId> {
        (1..=n).map(OperatorId::new).collect()
    }

    #[test]
    fn quorum_for_four_operators() {
        let share = Share::new(OperatorId::new(1), committee(4)).unwrap();
        assert_eq!(share.quorum(), 3);
        assert_eq!(share.partial_quorum(), 2);
    }

    #[test]
    fn quorum_for_seven_operators() {
        let share = Share::new(OperatorId::new(1), committee(7)).unwrap();
        assert_eq!(share.quorum(), 5);
        assert_eq!(share.partial_quorum(), 3);
    }

    #[test]
    fn rejects_operator_outside_committee() {
        let err = Share::new(OperatorId::new(9), committee(4)).unwrap_err();
        assert_eq!(err, TypesError::NotInCommittee(OperatorId::new(9)));
    }
}
