
use crate::{ClientError, ClientResult, MemberDirectory, MemberHealth, MemberRecord};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ms_resilience::CircuitBreakerSettings;

/// Window 4, minimum 4 calls, 50% threshold, 1 trial call
pub(crate) fn test_settings() -> CircuitBreakerSettings {
    CircuitBreakerSettings {
        sliding_window_size: 4,
        minimum_number_of_calls: 4,
        failure_rate_threshold: 50.0,
        open_duration: Duration::from_secs(30),
        half_open_permitted_calls: 1,
        call_timeout: Duration::from_millis(200),
    }
}

/// In-process member-service double that counts calls.
#[derive(Default)]
pub(crate) struct FakeDirectory {
    pub calls: AtomicUsize,
    pub down: AtomicBool,
    pub last_authorization: std::sync::Mutex<Option<String>>,
}

impl FakeDirectory {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

pub(crate) fn member_record(id: i64) -> MemberRecord {
    MemberRecord {
        id,
        username: format!("member{}", id),
        email: format!("member{}@example.com", id),
        full_name: format!("Member {}", id),
        phone_number: None,
        status: "ACTIVE".to_string(),
        status_description: "Active".to_string(),
    }
}

#[async_trait]
impl MemberDirectory for FakeDirectory {
    async fn member_by_id(&self, id: i64, authorization: Option<&str>) -> ClientResult<MemberRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_authorization.lock().unwrap() = authorization.map(String::from);

        if self.down.load(Ordering::SeqCst) {
            return Err(ClientError::status(503));
        }
        Ok(member_record(id))
    }

    async fn health(&self) -> ClientResult<MemberHealth> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.down.load(Ordering::SeqCst) {
            return Err(ClientError::status(503));
        }
        Ok(MemberHealth {
            status: "UP".to_string(),
            service: "member-service".to_string(),
        })
    }
}
