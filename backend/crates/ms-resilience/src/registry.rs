use crate::{CircuitBreaker, CircuitBreakerSettings, MetricsSnapshot};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Breakers keyed by dependency name.
///
/// Every call site naming the same dependency shares one breaker, so their
/// outcomes feed the same window.
pub struct CircuitBreakerRegistry {
    settings: CircuitBreakerSettings,
    breakers: RwLock<HashMap<String, Arc<CircuitBreaker>>>,
}

impl CircuitBreakerRegistry {
    pub fn new(settings: CircuitBreakerSettings) -> Self {
        Self {
            settings,
            breakers: RwLock::new(HashMap::new()),
        }
    }

    /// Get the breaker for `name`, creating it on first use.
    pub fn breaker(&self, name: &str) -> Arc<CircuitBreaker> {
        // Fast path: read lock
        {
            let breakers = self.breakers.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(breaker) = breakers.get(name) {
                return breaker.clone();
            }
        }

        let mut breakers = self.breakers.write().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have created it while we waited for the write lock
        breakers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(CircuitBreaker::new(name, self.settings.clone())))
            .clone()
    }

    /// Existing breaker only; never creates one.
    pub fn get(&self, name: &str) -> Option<Arc<CircuitBreaker>> {
        self.breakers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Snapshots of every breaker, sorted by name.
    pub fn snapshots(&self) -> Vec<MetricsSnapshot> {
        let breakers: Vec<Arc<CircuitBreaker>> = self
            .breakers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        let mut snapshots: Vec<MetricsSnapshot> = breakers.iter().map(|b| b.metrics()).collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        snapshots
    }
}
