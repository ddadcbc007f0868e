use ms_config::CircuitBreakerConfig;

use std::time::Duration;

/// Runtime form of `[circuit_breaker]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitBreakerSettings {
    pub sliding_window_size: usize,
    pub minimum_number_of_calls: usize,
    /// Percentage (1-100) at or above which the circuit opens
    pub failure_rate_threshold: f64,
    pub open_duration: Duration,
    pub half_open_permitted_calls: u32,
    pub call_timeout: Duration,
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self::from(&CircuitBreakerConfig::default())
    }
}

impl From<&CircuitBreakerConfig> for CircuitBreakerSettings {
    fn from(config: &CircuitBreakerConfig) -> Self {
        Self {
            sliding_window_size: config.sliding_window_size as usize,
            minimum_number_of_calls: config.minimum_number_of_calls as usize,
            failure_rate_threshold: config.failure_rate_threshold,
            open_duration: Duration::from_secs(config.open_duration_secs),
            half_open_permitted_calls: config.half_open_permitted_calls,
            call_timeout: Duration::from_millis(config.call_timeout_ms),
        }
    }
}
