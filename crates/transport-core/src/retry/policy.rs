use crate::auth::{self, AuthDecision, RefreshResult};
use crate::config::EngineConfig;
use crate::model::{Decision, FailReason, Outcome, RequestContext, RetryReason};

use super::classify::{classify, Category};
use super::error::ContractError;
use super::gate::admit_retry;

/// Decision policy: classification, gate, and auth coordination wired together.
///
/// The only tunable is an optional ceiling on forwarded retry-after hints;
/// with the default policy hints pass through verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Upper bound on a forwarded retry-after hint, in milliseconds.
    pub max_retry_after_ms: Option<u32>,
}

impl Policy {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            max_retry_after_ms: cfg.max_retry_after_ms,
        }
    }

    /// Decide what the driver does next with this attempt.
    ///
    /// `auth_decision` is only consulted for auth challenges. `refresh` is
    /// only consulted for auth challenges too; for every other category the
    /// outcome alone decides.
    pub fn decide(
        &self,
        ctx: &RequestContext,
        outcome: &Outcome,
        auth_decision: Option<AuthDecision>,
        refresh: Option<RefreshResult>,
    ) -> Result<Decision, ContractError> {
        if let Err(e) = validate(ctx, outcome) {
            tracing::warn!(error = %e, ?ctx, ?outcome, "rejected decide call");
            return Err(e);
        }

        let category = classify(outcome);
        let decision = match category {
            Category::Success => Decision::Proceed,
            Category::Transient(reason) => admit_retry(ctx, reason, 0),
            Category::RateLimited { retry_after_ms } => {
                admit_retry(ctx, RetryReason::RateLimited, self.clamp(retry_after_ms))
            }
            Category::AuthChallenge => auth::coordinate(ctx, auth_decision, refresh),
            // Never budget-sensitive.
            Category::PermanentBlock => Decision::Fail {
                reason: FailReason::HardBlocked,
                retryable: false,
            },
            Category::PermanentClientError | Category::Unexpected => Decision::Fail {
                reason: FailReason::Unknown,
                retryable: false,
            },
        };

        tracing::debug!(
            method = %ctx.method,
            attempt = ctx.attempt,
            max_attempts = ctx.max_attempts,
            ?category,
            ?decision,
            "decided"
        );
        Ok(decision)
    }

    fn clamp(&self, retry_after_ms: u32) -> u32 {
        match self.max_retry_after_ms {
            Some(cap) => retry_after_ms.min(cap),
            None => retry_after_ms,
        }
    }
}

/// [`Policy::decide`] with the default policy.
pub fn decide(
    ctx: &RequestContext,
    outcome: &Outcome,
    auth_decision: Option<AuthDecision>,
    refresh: Option<RefreshResult>,
) -> Result<Decision, ContractError> {
    Policy::default().decide(ctx, outcome, auth_decision, refresh)
}

fn validate(ctx: &RequestContext, outcome: &Outcome) -> Result<(), ContractError> {
    if ctx.attempt == 0 {
        return Err(ContractError::ZeroAttempt);
    }
    if ctx.max_attempts == 0 {
        return Err(ContractError::ZeroBudget);
    }
    if let Outcome::HttpStatus(code) = *outcome {
        if !(100..=599).contains(&code) {
            return Err(ContractError::StatusOutOfRange(code));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HttpMethod;

    fn get(attempt: u8, max: u8) -> RequestContext {
        RequestContext::new(HttpMethod::Get, attempt, max)
    }

    #[test]
    fn rejects_zero_attempt_and_budget() {
        assert_eq!(
            decide(&get(0, 3), &Outcome::NetworkError, None, None),
            Err(ContractError::ZeroAttempt)
        );
        assert_eq!(
            decide(&get(1, 0), &Outcome::NetworkError, None, None),
            Err(ContractError::ZeroBudget)
        );
    }

    #[test]
    fn rejects_status_outside_http_range() {
        assert_eq!(
            decide(&get(1, 3), &Outcome::HttpStatus(99), None, None),
            Err(ContractError::StatusOutOfRange(99))
        );
        assert_eq!(
            decide(&get(1, 3), &Outcome::HttpStatus(600), None, None),
            Err(ContractError::StatusOutOfRange(600))
        );
    }

    #[test]
    fn hard_block_ignores_budget() {
        let d = decide(&get(1, 100), &Outcome::Blocked, None, None).unwrap();
        assert_eq!(
            d,
            Decision::Fail {
                reason: FailReason::HardBlocked,
                retryable: false
            }
        );
    }

    #[test]
    fn server_error_retries_as_network() {
        let d = decide(&get(2, 3), &Outcome::HttpStatus(502), None, None).unwrap();
        assert_eq!(
            d,
            Decision::Retry {
                reason: RetryReason::Network,
                retry_after_ms: 0
            }
        );
    }

    #[test]
    fn bare_429_retries_without_hint() {
        let d = decide(&get(1, 3), &Outcome::HttpStatus(429), None, None).unwrap();
        assert_eq!(
            d,
            Decision::Retry {
                reason: RetryReason::RateLimited,
                retry_after_ms: 0
            }
        );
    }

    #[test]
    fn refresh_result_ignored_outside_auth_challenge() {
        let d = decide(
            &get(2, 3),
            &Outcome::HttpStatus(200),
            None,
            Some(RefreshResult::Failed),
        )
        .unwrap();
        assert_eq!(d, Decision::Proceed);
    }

    #[test]
    fn configured_cap_clamps_hint() {
        let policy = Policy {
            max_retry_after_ms: Some(120_000),
        };
        let d = policy
            .decide(
                &get(1, 3),
                &Outcome::RateLimited {
                    retry_after_ms: 600_000,
                },
                None,
                None,
            )
            .unwrap();
        assert_eq!(
            d,
            Decision::Retry {
                reason: RetryReason::RateLimited,
                retry_after_ms: 120_000
            }
        );
    }

    #[test]
    fn forbidden_is_not_an_auth_challenge() {
        let d = decide(
            &get(1, 3),
            &Outcome::HttpStatus(403),
            Some(AuthDecision::RefreshAndRetry),
            None,
        )
        .unwrap();
        assert_eq!(
            d,
            Decision::Fail {
                reason: FailReason::Unknown,
                retryable: false
            }
        );
    }
}
