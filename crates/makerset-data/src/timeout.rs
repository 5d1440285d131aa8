//! Timeout configuration for backend calls.

use std::time::Duration;

/// Timeout configuration for a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total time allowed for one attempt.
    pub total: Duration,
}

impl TimeoutConfig {
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Derive the connect timeout as a quarter of the total.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }

    pub fn from_millis(total_ms: u64) -> Self {
        Self::from_total(Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total() {
        let config = TimeoutConfig::from_millis(8000);
        assert_eq!(config.connect, Duration::from_secs(2));
        assert_eq!(config.total, Duration::from_secs(8));
        assert_eq!(TimeoutConfig::default().total, Duration::from_secs(10));
    }
}
