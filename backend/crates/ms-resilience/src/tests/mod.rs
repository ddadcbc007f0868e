
use crate::CircuitBreakerSettings;

use std::time::Duration;

pub(crate) const OPEN_DURATION: Duration = Duration::from_secs(10);
pub(crate) const CALL_TIMEOUT: Duration = Duration::from_millis(500);

/// Window 4, minimum 4 calls, 50% threshold, 2 trial calls
pub(crate) fn test_settings() -> CircuitBreakerSettings {
    CircuitBreakerSettings {
        sliding_window_size: 4,
        minimum_number_of_calls: 4,
        failure_rate_threshold: 50.0,
        open_duration: OPEN_DURATION,
        half_open_permitted_calls: 2,
        call_timeout: CALL_TIMEOUT,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PeerDown;

impl std::fmt::Display for PeerDown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "peer down")
    }
}
