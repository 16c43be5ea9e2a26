use std::time::Duration;

use qbft_types::Round;

/// Tunables for the round-timeout backoff (§4.2 "Timeout").
///
/// Owned by whoever constructs an [`crate::Instance`] (the engine layer);
/// never read from a process-wide default.
#[derive(Copy, Clone, Debug)]
pub struct TimeoutParams {
    /// Duration for round 1.
    pub base: Duration,
    /// Upper bound applied after the exponential growth.
    pub cap: Duration,
}

impl TimeoutParams {
    pub const fn new(base: Duration, cap: Duration) -> Self {
        Self { base, cap }
    }
}

impl Default for TimeoutParams {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(64))
    }
}

/// Round `r` gets `base * 2^(r-1)`, capped at `params.cap` (§4.2).
pub fn round_timeout(params: &TimeoutParams, round: Round) -> Duration {
    let exponent = round.as_u64().saturating_sub(1).min(63) as u32;
    let factor = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);

    let scaled = (params.base.as_nanos().min(u128::from(u64::MAX)) as u64)
        .checked_mul(factor)
        .map(Duration::from_nanos)
        .unwrap_or(params.cap);

    scaled.min(params.cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_exponentially_then_caps() {
        let params = TimeoutParams::new(Duration::from_secs(1), Duration::from_secs(10));
        assert_eq!(round_timeout(&params, Round::new(1)), Duration::from_secs(1));
        assert_eq!(round_timeout(&params, Round::new(2)), Duration::from_secs(2));
        assert_eq!(round_timeout(&params, Round::new(3)), Duration::from_secs(4));
        assert_eq!(round_timeout(&params, Round::new(5)), Duration::from_secs(10));
    }

    #[test]
    fn never_overflows_for_large_rounds() {
        let params = TimeoutParams::default();
        assert_eq!(round_timeout(&params, Round::new(10_000)), params.cap);
    }
}
