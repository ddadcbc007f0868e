use crate::{CallFailure, CircuitBreakerSettings, CircuitState, MetricsSnapshot};

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{info, warn};
use metrics::{counter, gauge};
use tokio::time::Instant;

/// Admission granted to one call; outcomes from an older generation are ignored.
#[derive(Debug, Clone, Copy)]
struct Permit {
    generation: u64,
}

/// Holds a permit while the operation runs. Dropped unsettled (the caller's
/// future was cancelled mid-call) it records the call as a failure, so a
/// half-open trial slot is never lost.
struct PermitGuard<'a> {
    breaker: &'a CircuitBreaker,
    permit: Permit,
    settled: bool,
}

impl PermitGuard<'_> {
    fn settle(mut self, failed: bool) {
        self.settled = true;
        self.breaker.record(self.permit, failed);
    }
}

impl Drop for PermitGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        warn!(
            "Circuit breaker '{}' call abandoned before completing",
            self.breaker.name
        );
        counter!(
            "ms_circuit_breaker_calls_total",
            "name" => self.breaker.name.clone(),
            "outcome" => "abandoned"
        )
        .increment(1);
        self.breaker.record(self.permit, true);
    }
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    /// Bumped on every transition
    generation: u64,
    /// Most recent outcomes, `true` = failure
    window: VecDeque<bool>,
    opened_at: Option<Instant>,
    half_open_admitted: u32,
    not_permitted: u64,
}

impl BreakerState {
    fn failures(&self) -> usize {
        self.window.iter().filter(|failed| **failed).count()
    }

    fn failure_rate(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.failures() as f64 * 100.0 / self.window.len() as f64
    }
}

/// Count-based sliding-window circuit breaker for one named dependency.
///
/// State and counters live behind a single mutex, so admission, outcome
/// recording and transitions are atomic with respect to each other. The
/// lock is never held across an await.
pub struct CircuitBreaker {
    name: String,
    settings: CircuitBreakerSettings,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, settings: CircuitBreakerSettings) -> Self {
        let name = name.into();
        gauge!("ms_circuit_breaker_state", "name" => name.clone())
            .set(CircuitState::Closed.gauge_value());

        Self {
            name,
            settings,
            inner: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                generation: 0,
                window: VecDeque::new(),
                opened_at: None,
                half_open_admitted: 0,
                not_permitted: 0,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &CircuitBreakerSettings {
        &self.settings
    }

    /// Current state. An open circuit whose cool-down has elapsed still
    /// reports `Open` until the next call moves it to `HalfOpen`.
    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    /// Run `operation` through the breaker, substituting `fallback` on any failure.
    ///
    /// The fallback receives the reason the real value is missing and must
    /// produce a value of the same type. Its result is returned as-is and is
    /// not itself recorded as a failure.
    pub async fn call<T, E, Op, Fut, Fb>(&self, operation: Op, fallback: Fb) -> T
    where
        Op: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        Fb: FnOnce(CallFailure<E>) -> T,
        E: std::fmt::Display,
    {
        match self.execute(operation).await {
            Ok(value) => value,
            Err(failure) => {
                warn!(
                    "Circuit breaker '{}' fallback ({}): {}",
                    self.name,
                    failure.kind(),
                    failure
                );
                counter!(
                    "ms_circuit_breaker_fallbacks_total",
                    "name" => self.name.clone(),
                    "reason" => failure.kind()
                )
                .increment(1);
                fallback(failure)
            }
        }
    }

    /// Run `operation` through the breaker and report failures to the caller.
    pub async fn execute<T, E, Op, Fut>(&self, operation: Op) -> Result<T, CallFailure<E>>
    where
        Op: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(permit) = self.try_acquire() else {
            counter!(
                "ms_circuit_breaker_calls_total",
                "name" => self.name.clone(),
                "outcome" => "not_permitted"
            )
            .increment(1);
            return Err(CallFailure::NotPermitted {
                name: self.name.clone(),
            });
        };

        let guard = PermitGuard {
            breaker: self,
            permit,
            settled: false,
        };

        let result = match tokio::time::timeout(self.settings.call_timeout, operation()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CallFailure::Failed(e)),
            Err(_) => Err(CallFailure::Timeout(self.settings.call_timeout)),
        };

        let outcome = match &result {
            Ok(_) => "success",
            Err(failure) => failure.kind(),
        };
        counter!(
            "ms_circuit_breaker_calls_total",
            "name" => self.name.clone(),
            "outcome" => outcome
        )
        .increment(1);

        guard.settle(result.is_err());
        result
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        let inner = self.lock();
        let buffered = inner.window.len();
        let failed = inner.failures();

        let evaluated_at = match inner.state {
            CircuitState::HalfOpen => self.settings.half_open_permitted_calls as usize,
            _ => self.settings.minimum_number_of_calls,
        };
        let failure_rate = if buffered >= evaluated_at.max(1) {
            inner.failure_rate()
        } else {
            -1.0
        };

        MetricsSnapshot {
            name: self.name.clone(),
            state: inner.state,
            failure_rate,
            successful_calls: (buffered - failed) as u32,
            failed_calls: failed as u32,
            not_permitted_calls: inner.not_permitted,
            buffered_calls: buffered as u32,
        }
    }

    fn try_acquire(&self) -> Option<Permit> {
        let mut inner = self.lock();

        if inner.state == CircuitState::Open
            && inner
                .opened_at
                .is_some_and(|opened| opened.elapsed() >= self.settings.open_duration)
        {
            self.transition(&mut inner, CircuitState::HalfOpen);
        }

        match inner.state {
            CircuitState::Closed => Some(Permit {
                generation: inner.generation,
            }),
            CircuitState::HalfOpen
                if inner.half_open_admitted < self.settings.half_open_permitted_calls =>
            {
                inner.half_open_admitted += 1;
                Some(Permit {
                    generation: inner.generation,
                })
            }
            CircuitState::Open | CircuitState::HalfOpen => {
                inner.not_permitted += 1;
                None
            }
        }
    }

    fn record(&self, permit: Permit, failed: bool) {
        let mut inner = self.lock();

        if permit.generation != inner.generation {
            return;
        }

        match inner.state {
            CircuitState::Closed => {
                inner.window.push_back(failed);
                while inner.window.len() > self.settings.sliding_window_size {
                    inner.window.pop_front();
                }

                if inner.window.len() >= self.settings.minimum_number_of_calls
                    && inner.failure_rate() >= self.settings.failure_rate_threshold
                {
                    let rate = inner.failure_rate();
                    self.transition(&mut inner, CircuitState::Open);
                    warn!(
                        "Circuit breaker '{}' OPEN: failure rate {:.1}% >= {:.1}%",
                        self.name, rate, self.settings.failure_rate_threshold
                    );
                }
            }
            CircuitState::HalfOpen => {
                inner.window.push_back(failed);

                if inner.window.len() >= self.settings.half_open_permitted_calls as usize {
                    let rate = inner.failure_rate();
                    if rate >= self.settings.failure_rate_threshold {
                        self.transition(&mut inner, CircuitState::Open);
                        warn!(
                            "Circuit breaker '{}' reopened: trial failure rate {:.1}%",
                            self.name, rate
                        );
                    } else {
                        self.transition(&mut inner, CircuitState::Closed);
                        info!(
                            "Circuit breaker '{}' closed: trial failure rate {:.1}%",
                            self.name, rate
                        );
                    }
                }
            }
            CircuitState::Open => {}
        }
    }

    fn transition(&self, inner: &mut BreakerState, to: CircuitState) {
        let from = inner.state;
        inner.state = to;
        inner.generation += 1;

        match to {
            CircuitState::Open => {
                // Keep the window that tripped the circuit visible in metrics.
                inner.opened_at = Some(Instant::now());
            }
            CircuitState::HalfOpen => {
                inner.window.clear();
                inner.half_open_admitted = 0;
                inner.not_permitted = 0;
            }
            CircuitState::Closed => {
                inner.window.clear();
                inner.opened_at = None;
                inner.not_permitted = 0;
            }
        }

        info!("Circuit breaker '{}' {} -> {}", self.name, from, to);
        counter!(
            "ms_circuit_breaker_transitions_total",
            "name" => self.name.clone(),
            "to" => to.as_str()
        )
        .increment(1);
        gauge!("ms_circuit_breaker_state", "name" => self.name.clone()).set(to.gauge_value());
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
