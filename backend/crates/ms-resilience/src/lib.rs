//! Circuit breaking for calls to peer services.
//!
//! A [`CircuitBreaker`] guards one named dependency. Callers hand it the
//! protected operation and a fallback; the fallback runs whenever the
//! operation fails, times out or is short-circuited, and its value is
//! returned in place of the real result.

mod call_failure;
mod circuit_breaker;
mod circuit_state;
mod metrics_snapshot;
mod registry;
mod settings;

pub use call_failure::CallFailure;
pub use circuit_breaker::CircuitBreaker;
pub use circuit_state::CircuitState;
pub use metrics_snapshot::MetricsSnapshot;
pub use registry::CircuitBreakerRegistry;
pub use settings::CircuitBreakerSettings;

#[cfg(test)]
mod tests;
