use qbft_driver::TimeoutParams;

/// The tunables the core needs as inputs (§6 ambient config): round-timeout
/// backoff and per-role queue capacity. Constructed by the embedder and
/// threaded through; never read from a process-wide global.
#[derive(Copy, Clone, Debug)]
pub struct EngineConfig {
    pub timeout: TimeoutParams,
    pub queue_capacity: usize,
}

impl EngineConfig {
    pub const fn new(timeout: TimeoutParams, queue_capacity: usize) -> Self {
        Self {
            timeout,
            queue_capacity,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: TimeoutParams::default(),
            queue_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn default_timeout_base_is_two_seconds() {
        assert_eq!(EngineConfig::default().timeout.base, Duration::from_secs(2));
    }
}
