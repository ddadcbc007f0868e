use crate::client::member_directory::{MemberDirectory, MemberHealth, MemberRecord};

use ms_resilience::{CircuitBreaker, CircuitBreakerRegistry};

use std::collections::HashMap;
use std::sync::Arc;

/// Breaker shared by every member-service call in this process.
pub const MEMBER_SERVICE_BREAKER: &str = "member-service";

/// Member lookups guarded by the `member-service` circuit breaker.
///
/// Every method returns a usable value: when member-service fails, times
/// out or the circuit is open, a placeholder comes back instead of an
/// error, so order handling degrades rather than fails.
pub struct MemberIntegration {
    directory: Arc<dyn MemberDirectory>,
    breaker: Arc<CircuitBreaker>,
}

impl MemberIntegration {
    pub fn new(directory: Arc<dyn MemberDirectory>, registry: &CircuitBreakerRegistry) -> Self {
        Self {
            directory,
            breaker: registry.breaker(MEMBER_SERVICE_BREAKER),
        }
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub async fn member(&self, id: i64, authorization: Option<&str>) -> MemberRecord {
        log::debug!("Validating member with ID: {}", id);

        self.breaker
            .call(
                || self.directory.member_by_id(id, authorization),
                |_| {
                    log::warn!("Member service unavailable, using placeholder for member {}", id);
                    MemberRecord::unavailable(id)
                },
            )
            .await
    }

    pub async fn member_name(&self, id: i64, authorization: Option<&str>) -> String {
        self.member(id, authorization).await.full_name
    }

    /// Display names for a set of member ids, one lookup per distinct id.
    pub async fn member_names<I>(&self, ids: I, authorization: Option<&str>) -> HashMap<i64, String>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut names = HashMap::new();
        for id in ids {
            if !names.contains_key(&id) {
                let name = self.member_name(id, authorization).await;
                names.insert(id, name);
            }
        }
        names
    }

    pub async fn health(&self) -> MemberHealth {
        self.breaker
            .call(|| self.directory.health(), |_| MemberHealth::unavailable())
            .await
    }
}
