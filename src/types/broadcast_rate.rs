//! Broadcast rate control for the emission gates

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum per-key emission rate in Hz.
///
/// Zero or negative rates fall back to [`BroadcastRate::FALLBACK_INTERVAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BroadcastRate(pub i32);

impl BroadcastRate {
    /// Interval used when no positive rate is configured.
    pub const FALLBACK_INTERVAL: Duration = Duration::from_millis(500);

    /// Minimum time between two emissions of the same key.
    pub fn interval(self) -> Duration {
        match u32::try_from(self.0) {
            Ok(hz) if hz > 0 => Duration::from_secs(1) / hz,
            _ => Self::FALLBACK_INTERVAL,
        }
    }
}

impl Default for BroadcastRate {
    fn default() -> Self {
        BroadcastRate(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rate_divides_one_second() {
        assert_eq!(BroadcastRate(2).interval(), Duration::from_millis(500));
        assert_eq!(BroadcastRate(20).interval(), Duration::from_millis(50));
    }

    #[test]
    fn non_positive_rate_uses_fallback() {
        assert_eq!(BroadcastRate(0).interval(), BroadcastRate::FALLBACK_INTERVAL);
        assert_eq!(BroadcastRate(-5).interval(), BroadcastRate::FALLBACK_INTERVAL);
    }
}
