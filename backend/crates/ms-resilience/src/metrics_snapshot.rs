use crate::CircuitState;

/// Point-in-time view of one breaker.
///
/// Call counts cover the outcomes currently buffered for the active state;
/// they reset when the circuit closes or goes half-open.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub name: String,
    pub state: CircuitState,
    /// Failure percentage, or `-1.0` until the minimum number of calls is buffered
    pub failure_rate: f64,
    pub successful_calls: u32,
    pub failed_calls: u32,
    pub not_permitted_calls: u64,
    pub buffered_calls: u32,
}
