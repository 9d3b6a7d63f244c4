//! Two-phase credential refresh negotiation for 401 responses.
//!
//! Phase A (no refresh attempted yet): the engine does not judge whether a
//! refresh is worthwhile; it follows the verdict from the external auth
//! subsystem. Phase B (a refresh already ran): the same original request is
//! re-evaluated against the refresh result.

use crate::model::{Decision, FailReason, RequestContext, RetryReason};
use crate::retry::admit_retry;

/// Verdict supplied by the auth subsystem for an auth challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    RefreshAndRetry,
    Fail,
}

/// Outcome of a refresh the driver performed after REFRESH_AND_RETRY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshResult {
    Succeeded,
    Failed,
}

impl From<bool> for RefreshResult {
    fn from(ok: bool) -> Self {
        if ok {
            RefreshResult::Succeeded
        } else {
            RefreshResult::Failed
        }
    }
}

const AUTH_FAILED: Decision = Decision::Fail {
    reason: FailReason::AuthFailed,
    retryable: false,
};

/// Resolve an auth challenge.
///
/// A missing `auth_decision` in phase A is treated as [`AuthDecision::Fail`].
pub fn coordinate(
    ctx: &RequestContext,
    auth_decision: Option<AuthDecision>,
    refresh: Option<RefreshResult>,
) -> Decision {
    match refresh {
        None => match auth_decision {
            Some(AuthDecision::RefreshAndRetry) if ctx.has_budget() => Decision::RefreshAndRetry,
            Some(AuthDecision::RefreshAndRetry) => Decision::Fail {
                reason: FailReason::MaxAttemptsExceeded,
                retryable: true,
            },
            Some(AuthDecision::Fail) | None => AUTH_FAILED,
        },
        // The retry after a refresh is a second physical attempt, so it still
        // goes through the idempotency gate.
        Some(RefreshResult::Succeeded) => admit_retry(ctx, RetryReason::AuthExpired, 0),
        Some(RefreshResult::Failed) => AUTH_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HttpMethod;

    fn get(attempt: u8) -> RequestContext {
        RequestContext::new(HttpMethod::Get, attempt, 3)
    }

    #[test]
    fn phase_a_follows_external_verdict() {
        assert_eq!(
            coordinate(&get(1), Some(AuthDecision::RefreshAndRetry), None),
            Decision::RefreshAndRetry
        );
        assert_eq!(coordinate(&get(1), Some(AuthDecision::Fail), None), AUTH_FAILED);
        assert_eq!(coordinate(&get(1), None, None), AUTH_FAILED);
    }

    #[test]
    fn phase_a_respects_budget() {
        assert_eq!(
            coordinate(&get(3), Some(AuthDecision::RefreshAndRetry), None),
            Decision::Fail {
                reason: FailReason::MaxAttemptsExceeded,
                retryable: true
            }
        );
    }

    #[test]
    fn phase_b_success_retries_as_auth_expired() {
        assert_eq!(
            coordinate(&get(1), Some(AuthDecision::RefreshAndRetry), Some(true.into())),
            Decision::Retry {
                reason: RetryReason::AuthExpired,
                retry_after_ms: 0
            }
        );
    }

    #[test]
    fn phase_b_success_still_gated_on_idempotency() {
        let post = RequestContext::new(HttpMethod::Post, 1, 3);
        assert_eq!(
            coordinate(&post, None, Some(RefreshResult::Succeeded)),
            Decision::Fail {
                reason: FailReason::Unknown,
                retryable: false
            }
        );
    }

    #[test]
    fn phase_b_failure_is_terminal() {
        assert_eq!(
            coordinate(&get(1), Some(AuthDecision::RefreshAndRetry), Some(RefreshResult::Failed)),
            AUTH_FAILED
        );
    }
}
