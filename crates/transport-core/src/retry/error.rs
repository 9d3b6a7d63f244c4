//! Caller-contract violations.
//!
//! These are programmer errors on the driver side. They are reported
//! immediately and never coerced into a policy decision.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("attempt must be at least 1")]
    ZeroAttempt,
    #[error("max_attempts must be at least 1")]
    ZeroBudget,
    #[error("HTTP status {0} is outside 100..=599")]
    StatusOutOfRange(u16),
    #[error("unknown HTTP method code {0}")]
    UnknownMethod(i32),
    #[error("unknown outcome kind {0}")]
    UnknownOutcomeKind(i32),
    #[error("unknown auth decision code {0}")]
    UnknownAuthDecision(i32),
    #[error("unknown refresh result {0} (expected -1, 0 or 1)")]
    UnknownRefreshResult(i8),
    #[error("null pointer passed for {0}")]
    NullPointer(&'static str),
    #[error("engine panicked while deciding")]
    Panicked,
}
