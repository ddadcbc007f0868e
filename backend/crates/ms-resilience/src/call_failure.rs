use std::time::Duration;

use thiserror::Error;

/// Why a guarded call did not produce the operation's own value.
#[derive(Error, Debug)]
pub enum CallFailure<E> {
    #[error("call not permitted: circuit breaker '{name}' is open")]
    NotPermitted { name: String },

    #[error("call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("call failed: {0}")]
    Failed(E),
}

impl<E> CallFailure<E> {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotPermitted { .. } => "not_permitted",
            Self::Timeout(_) => "timeout",
            Self::Failed(_) => "failure",
        }
    }

    pub fn is_not_permitted(&self) -> bool {
        matches!(self, Self::NotPermitted { .. })
    }
}
