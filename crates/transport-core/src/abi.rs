//! Numeric encodings for the C boundary.
//!
//! Every integer that crosses [`crate::ffi`] is assigned here and nowhere
//! else. Assignments are append-only: new members get new numbers, existing
//! numbers never move.

use crate::auth::{AuthDecision, RefreshResult};
use crate::model::{DecisionKind, FailReason, HttpMethod, Outcome, RetryReason};
use crate::retry::ContractError;

/// Bumped when the boundary widens. Version 1 added the detail accessors,
/// semantic outcome kinds, and `tc_last_error_code`.
pub const ABI_VERSION: u32 = 1;

/// Returned by `tc_decide` instead of a decision when the call was rejected.
pub const DECISION_INVALID: i32 = -1;

pub const OUTCOME_NETWORK_ERROR: i32 = 0;
pub const OUTCOME_TIMEOUT_ERROR: i32 = 1;
pub const OUTCOME_HTTP_STATUS: i32 = 2;
pub const OUTCOME_RATE_LIMITED: i32 = 3;
pub const OUTCOME_BLOCKED: i32 = 4;
pub const OUTCOME_CAPTCHA: i32 = 5;

pub const REFRESH_NOT_ATTEMPTED: i8 = -1;

pub fn decision_code(kind: DecisionKind) -> i32 {
    match kind {
        DecisionKind::Proceed => 0,
        DecisionKind::Retry => 1,
        DecisionKind::RefreshAndRetry => 2,
        DecisionKind::Fail => 3,
    }
}

pub fn decision_from_code(code: i32) -> Option<DecisionKind> {
    match code {
        0 => Some(DecisionKind::Proceed),
        1 => Some(DecisionKind::Retry),
        2 => Some(DecisionKind::RefreshAndRetry),
        3 => Some(DecisionKind::Fail),
        _ => None,
    }
}

/// 0 means no retry reason.
pub fn retry_reason_code(reason: Option<RetryReason>) -> u8 {
    match reason {
        None => 0,
        Some(RetryReason::Network) => 1,
        Some(RetryReason::Timeout) => 2,
        Some(RetryReason::RateLimited) => 3,
        Some(RetryReason::AuthExpired) => 4,
    }
}

/// 0 means no fail reason.
pub fn fail_reason_code(reason: Option<FailReason>) -> u8 {
    match reason {
        None => 0,
        Some(FailReason::MaxAttemptsExceeded) => 1,
        Some(FailReason::AuthFailed) => 2,
        Some(FailReason::HardBlocked) => 3,
        Some(FailReason::Unknown) => 255,
    }
}

pub fn method_from_code(code: i32) -> Result<HttpMethod, ContractError> {
    match code {
        0 => Ok(HttpMethod::Get),
        1 => Ok(HttpMethod::Post),
        2 => Ok(HttpMethod::Put),
        3 => Ok(HttpMethod::Delete),
        4 => Ok(HttpMethod::Head),
        5 => Ok(HttpMethod::Options),
        other => Err(ContractError::UnknownMethod(other)),
    }
}

pub fn auth_decision_from_code(code: i32) -> Result<AuthDecision, ContractError> {
    match code {
        0 => Ok(AuthDecision::RefreshAndRetry),
        1 => Ok(AuthDecision::Fail),
        other => Err(ContractError::UnknownAuthDecision(other)),
    }
}

/// Tri-state: -1 not attempted, 0 failed, 1 succeeded.
pub fn refresh_from_code(code: i8) -> Result<Option<RefreshResult>, ContractError> {
    match code {
        REFRESH_NOT_ATTEMPTED => Ok(None),
        0 => Ok(Some(RefreshResult::Failed)),
        1 => Ok(Some(RefreshResult::Succeeded)),
        other => Err(ContractError::UnknownRefreshResult(other)),
    }
}

/// `http_status` is read only for HTTP_STATUS, `retry_after_ms` only for
/// RATE_LIMITED.
pub fn outcome_from_parts(
    kind: i32,
    http_status: u16,
    retry_after_ms: u32,
) -> Result<Outcome, ContractError> {
    match kind {
        OUTCOME_NETWORK_ERROR => Ok(Outcome::NetworkError),
        OUTCOME_TIMEOUT_ERROR => Ok(Outcome::TimeoutError),
        OUTCOME_HTTP_STATUS => Ok(Outcome::HttpStatus(http_status)),
        OUTCOME_RATE_LIMITED => Ok(Outcome::RateLimited { retry_after_ms }),
        OUTCOME_BLOCKED => Ok(Outcome::Blocked),
        OUTCOME_CAPTCHA => Ok(Outcome::CaptchaChallenge),
        other => Err(ContractError::UnknownOutcomeKind(other)),
    }
}

/// 0 = none, 1 = attempt/budget, 2 = status, 3 = unknown enum value, 4 = null pointer,
/// 5 = internal panic.
pub fn error_code(error: Option<ContractError>) -> u8 {
    match error {
        None => 0,
        Some(ContractError::ZeroAttempt | ContractError::ZeroBudget) => 1,
        Some(ContractError::StatusOutOfRange(_)) => 2,
        Some(
            ContractError::UnknownMethod(_)
            | ContractError::UnknownOutcomeKind(_)
            | ContractError::UnknownAuthDecision(_)
            | ContractError::UnknownRefreshResult(_),
        ) => 3,
        Some(ContractError::NullPointer(_)) => 4,
        Some(ContractError::Panicked) => 5,
    }
}
