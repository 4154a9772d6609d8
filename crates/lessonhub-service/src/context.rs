//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lessonhub_core::types::UserId;

/// Context for one lifecycle command.
///
/// Built by the transport layer and passed into every service method so
/// that each operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub actor_id: UserId,
    /// Correlation ID for log lines of this request.
    pub request_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(actor_id: UserId) -> Self {
        Self {
            actor_id,
            request_id: Uuid::new_v4(),
            request_time: Utc::now(),
        }
    }

    /// Milliseconds since the request was received.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.request_time).num_milliseconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_elapsed_ms_counts_from_request_time() {
        let mut ctx = RequestContext::new(UserId::new());
        assert!(ctx.elapsed_ms() < 1_000);

        ctx.request_time = Utc::now() - Duration::seconds(5);
        assert!(ctx.elapsed_ms() >= 5_000);
    }

    #[test]
    fn test_elapsed_ms_is_never_negative() {
        let mut ctx = RequestContext::new(UserId::new());
        ctx.request_time = Utc::now() + Duration::seconds(60);
        assert_eq!(ctx.elapsed_ms(), 0);
    }
}
