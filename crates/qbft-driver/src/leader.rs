use qbft_types::{Height, OperatorId, Round, Share};

/// The leader-election function from §4.2:
///
/// ```text
/// L(height, round) = 1 + ((height + round - 1) mod |committee|)
/// ```
///
/// §9 notes this formula "matches observed test fixtures (operator 1 leads
/// the first round of the first height)" — that only holds if `height` and
/// `round` are 0-based in the formula, while this crate's [`Height`] and
/// [`Round`] count from 1 (§3). So the formula is applied to `height - 1`
/// and `round - 1`: the index `(height - 1 + round - 1) mod |committee|`
/// picks a position in `share.committee()`'s order, rather than an operator
/// id directly — the committee isn't required to be the contiguous range
/// `1..=n`.
pub fn leader(height: Height, round: Round, share: &Share) -> OperatorId {
    let index = leader_index(height, round, share);
    share.committee()[index]
}

/// Whether the local operator is the leader for `round`.
pub fn is_local_leader(height: Height, round: Round, share: &Share) -> bool {
    share.committee_index(share.operator_id()) == Some(leader_index(height, round, share))
}

fn leader_index(height: Height, round: Round, share: &Share) -> usize {
    let n = share.committee_size() as u64;
    ((height.as_u64() - 1 + round.as_u64() - 1) % n) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(n: u64) -> Share {
        Share::new(OperatorId::new(1), (1..=n).map(OperatorId::new).collect()).unwrap()
    }

    #[test]
    fn operator_one_leads_first_round_of_first_height() {
        let s = share(4);
        assert_eq!(leader(Height::ONE, Round::ONE, &s), OperatorId::new(1));
    }

    #[test]
    fn leadership_rotates_with_round() {
        let s = share(4);
        assert_eq!(leader(Height::ONE, Round::new(2), &s), OperatorId::new(2));
        assert_eq!(leader(Height::ONE, Round::new(4), &s), OperatorId::new(4));
    }

    #[test]
    fn leadership_wraps_around_the_committee() {
        let s = share(4);
        assert_eq!(leader(Height::ONE, Round::new(5), &s), OperatorId::new(1));
    }
}
