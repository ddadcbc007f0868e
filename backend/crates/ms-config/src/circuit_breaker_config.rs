use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Circuit breaker constraints
pub const MIN_SLIDING_WINDOW_SIZE: u32 = 1;
pub const MAX_SLIDING_WINDOW_SIZE: u32 = 1000;
pub const DEFAULT_SLIDING_WINDOW_SIZE: u32 = 10;

pub const MIN_MINIMUM_NUMBER_OF_CALLS: u32 = 1;
pub const DEFAULT_MINIMUM_NUMBER_OF_CALLS: u32 = 5;

pub const MIN_FAILURE_RATE_THRESHOLD: f64 = 1.0;
pub const MAX_FAILURE_RATE_THRESHOLD: f64 = 100.0;
pub const DEFAULT_FAILURE_RATE_THRESHOLD: f64 = 50.0;

pub const MIN_OPEN_DURATION_SECS: u64 = 1;
pub const MAX_OPEN_DURATION_SECS: u64 = 300;
pub const DEFAULT_OPEN_DURATION_SECS: u64 = 10;

pub const MIN_HALF_OPEN_PERMITTED_CALLS: u32 = 1;
pub const MAX_HALF_OPEN_PERMITTED_CALLS: u32 = 50;
pub const DEFAULT_HALF_OPEN_PERMITTED_CALLS: u32 = 3;

pub const MIN_CALL_TIMEOUT_MS: u64 = 100;
pub const MAX_CALL_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 3_000;

/// Circuit breaker settings for calls to peer services.
///
/// Outcomes are tracked in a count-based sliding window; the breaker opens
/// once the failure rate over the window reaches the threshold.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Number of most recent calls considered
    pub sliding_window_size: u32,
    /// Calls required before the failure rate is evaluated
    pub minimum_number_of_calls: u32,
    /// Failure percentage that opens the circuit
    pub failure_rate_threshold: f64,
    /// Seconds to stay open before admitting trial calls
    pub open_duration_secs: u64,
    /// Trial calls admitted while half-open
    pub half_open_permitted_calls: u32,
    /// Per-call timeout; a timeout is recorded as a failure
    pub call_timeout_ms: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            sliding_window_size: DEFAULT_SLIDING_WINDOW_SIZE,
            minimum_number_of_calls: DEFAULT_MINIMUM_NUMBER_OF_CALLS,
            failure_rate_threshold: DEFAULT_FAILURE_RATE_THRESHOLD,
            open_duration_secs: DEFAULT_OPEN_DURATION_SECS,
            half_open_permitted_calls: DEFAULT_HALF_OPEN_PERMITTED_CALLS,
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.sliding_window_size < MIN_SLIDING_WINDOW_SIZE
            || self.sliding_window_size > MAX_SLIDING_WINDOW_SIZE
        {
            return Err(ConfigError::config(format!(
                "circuit_breaker.sliding_window_size must be {}-{}, got {}",
                MIN_SLIDING_WINDOW_SIZE, MAX_SLIDING_WINDOW_SIZE, self.sliding_window_size
            )));
        }

        if self.minimum_number_of_calls < MIN_MINIMUM_NUMBER_OF_CALLS
            || self.minimum_number_of_calls > self.sliding_window_size
        {
            return Err(ConfigError::config(format!(
                "circuit_breaker.minimum_number_of_calls must be {}-{} (sliding_window_size), got {}",
                MIN_MINIMUM_NUMBER_OF_CALLS, self.sliding_window_size, self.minimum_number_of_calls
            )));
        }

        if !(MIN_FAILURE_RATE_THRESHOLD..=MAX_FAILURE_RATE_THRESHOLD)
            .contains(&self.failure_rate_threshold)
        {
            return Err(ConfigError::config(format!(
                "circuit_breaker.failure_rate_threshold must be {}-{}, got {}",
                MIN_FAILURE_RATE_THRESHOLD, MAX_FAILURE_RATE_THRESHOLD, self.failure_rate_threshold
            )));
        }

        if self.open_duration_secs < MIN_OPEN_DURATION_SECS
            || self.open_duration_secs > MAX_OPEN_DURATION_SECS
        {
            return Err(ConfigError::config(format!(
                "circuit_breaker.open_duration_secs must be {}-{}, got {}",
                MIN_OPEN_DURATION_SECS, MAX_OPEN_DURATION_SECS, self.open_duration_secs
            )));
        }

        if self.half_open_permitted_calls < MIN_HALF_OPEN_PERMITTED_CALLS
            || self.half_open_permitted_calls > MAX_HALF_OPEN_PERMITTED_CALLS
        {
            return Err(ConfigError::config(format!(
                "circuit_breaker.half_open_permitted_calls must be {}-{}, got {}",
                MIN_HALF_OPEN_PERMITTED_CALLS,
                MAX_HALF_OPEN_PERMITTED_CALLS,
                self.half_open_permitted_calls
            )));
        }

        if self.call_timeout_ms < MIN_CALL_TIMEOUT_MS || self.call_timeout_ms > MAX_CALL_TIMEOUT_MS
        {
            return Err(ConfigError::config(format!(
                "circuit_breaker.call_timeout_ms must be {}-{}, got {}",
                MIN_CALL_TIMEOUT_MS, MAX_CALL_TIMEOUT_MS, self.call_timeout_ms
            )));
        }

        Ok(())
    }
}
