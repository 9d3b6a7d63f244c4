use serde::Deserialize;
use std::fmt;

/// Why a RETRY was offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetryReason {
    Network,
    Timeout,
    RateLimited,
    /// Credentials were refreshed; the original request goes out again.
    AuthExpired,
}

/// Why a FAIL was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailReason {
    MaxAttemptsExceeded,
    AuthFailed,
    HardBlocked,
    Unknown,
}

/// The engine's verdict for one attempt.
///
/// Each variant carries exactly the detail that is meaningful for it, so a
/// RETRY without a reason or a FAIL without a cause cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The attempt succeeded; hand the response to the caller.
    Proceed,
    /// Send the request again, optionally honouring a server hint.
    Retry {
        reason: RetryReason,
        retry_after_ms: u32,
    },
    /// Refresh credentials out-of-band, then re-evaluate.
    RefreshAndRetry,
    /// Give up. `retryable` is true only when the budget ran out on a
    /// category that would otherwise have been retried.
    Fail { reason: FailReason, retryable: bool },
}

/// Payload-free discriminant of [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionKind {
    Proceed,
    Retry,
    RefreshAndRetry,
    Fail,
}

impl DecisionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionKind::Proceed => "PROCEED",
            DecisionKind::Retry => "RETRY",
            DecisionKind::RefreshAndRetry => "REFRESH_AND_RETRY",
            DecisionKind::Fail => "FAIL",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Decision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Decision::Proceed => DecisionKind::Proceed,
            Decision::Retry { .. } => DecisionKind::Retry,
            Decision::RefreshAndRetry => DecisionKind::RefreshAndRetry,
            Decision::Fail { .. } => DecisionKind::Fail,
        }
    }

    /// Flatten into the auxiliary fields a narrow boundary reads one by one.
    pub fn detail(&self) -> DecisionDetail {
        match *self {
            Decision::Proceed | Decision::RefreshAndRetry => DecisionDetail::default(),
            Decision::Retry {
                reason,
                retry_after_ms,
            } => DecisionDetail {
                retry_after_ms,
                retry_reason: Some(reason),
                ..DecisionDetail::default()
            },
            Decision::Fail { reason, retryable } => DecisionDetail {
                fail_reason: Some(reason),
                fail_retryable: retryable,
                ..DecisionDetail::default()
            },
        }
    }
}

/// Auxiliary fields of the most recent decision.
///
/// `retry_reason` is set iff the decision was RETRY; `fail_reason` iff FAIL.
/// `retry_after_ms` is 0 and `fail_retryable` false whenever they do not apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionDetail {
    pub retry_after_ms: u32,
    pub retry_reason: Option<RetryReason>,
    pub fail_reason: Option<FailReason>,
    pub fail_retryable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proceed_and_refresh_have_empty_detail() {
        assert_eq!(Decision::Proceed.detail(), DecisionDetail::default());
        assert_eq!(Decision::RefreshAndRetry.detail(), DecisionDetail::default());
    }

    #[test]
    fn retry_detail_carries_reason_and_hint_only() {
        let d = Decision::Retry {
            reason: RetryReason::RateLimited,
            retry_after_ms: 3000,
        };
        let detail = d.detail();
        assert_eq!(detail.retry_reason, Some(RetryReason::RateLimited));
        assert_eq!(detail.retry_after_ms, 3000);
        assert_eq!(detail.fail_reason, None);
        assert!(!detail.fail_retryable);
    }

    #[test]
    fn fail_detail_carries_reason_and_retryable_only() {
        let d = Decision::Fail {
            reason: FailReason::MaxAttemptsExceeded,
            retryable: true,
        };
        let detail = d.detail();
        assert_eq!(detail.fail_reason, Some(FailReason::MaxAttemptsExceeded));
        assert!(detail.fail_retryable);
        assert_eq!(detail.retry_reason, None);
        assert_eq!(detail.retry_after_ms, 0);
        assert_eq!(d.kind(), DecisionKind::Fail);
    }
}
