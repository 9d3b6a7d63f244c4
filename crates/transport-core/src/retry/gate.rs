//! Idempotency and budget gate for retryable categories.

use crate::model::{Decision, FailReason, RequestContext, RetryReason};

/// Decide whether this request may retry at this attempt.
///
/// Budget is checked before safety: a request that is both out of attempts
/// and unsafe to repeat reports `MaxAttemptsExceeded`.
pub fn admit_retry(ctx: &RequestContext, reason: RetryReason, retry_after_ms: u32) -> Decision {
    if !ctx.has_budget() {
        return Decision::Fail {
            reason: FailReason::MaxAttemptsExceeded,
            retryable: true,
        };
    }

    if ctx.is_safe_to_repeat() {
        return Decision::Retry {
            reason,
            retry_after_ms,
        };
    }

    // Side-effecting request without a deduplication guarantee.
    Decision::Fail {
        reason: FailReason::Unknown,
        retryable: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HttpMethod;

    #[test]
    fn idempotent_method_with_budget_retries() {
        let ctx = RequestContext::new(HttpMethod::Put, 1, 3);
        assert_eq!(
            admit_retry(&ctx, RetryReason::Timeout, 0),
            Decision::Retry {
                reason: RetryReason::Timeout,
                retry_after_ms: 0
            }
        );
    }

    #[test]
    fn budget_exhaustion_wins_over_safety() {
        let ctx = RequestContext::new(HttpMethod::Post, 3, 3);
        assert_eq!(
            admit_retry(&ctx, RetryReason::Network, 0),
            Decision::Fail {
                reason: FailReason::MaxAttemptsExceeded,
                retryable: true
            }
        );
    }

    #[test]
    fn post_without_guarantee_fails_permanently() {
        let ctx = RequestContext::new(HttpMethod::Post, 1, 3);
        assert_eq!(
            admit_retry(&ctx, RetryReason::Network, 0),
            Decision::Fail {
                reason: FailReason::Unknown,
                retryable: false
            }
        );
    }

    #[test]
    fn post_with_override_or_key_retries() {
        let opted_in = RequestContext::new(HttpMethod::Post, 1, 3).allowing_non_idempotent_retry();
        assert!(matches!(
            admit_retry(&opted_in, RetryReason::Network, 0),
            Decision::Retry { .. }
        ));

        let keyed = RequestContext::new(HttpMethod::Post, 2, 3).with_idempotency_key("k-1");
        assert_eq!(
            admit_retry(&keyed, RetryReason::RateLimited, 750),
            Decision::Retry {
                reason: RetryReason::RateLimited,
                retry_after_ms: 750
            }
        );
    }
}
