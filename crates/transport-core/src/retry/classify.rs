//! Map raw attempt outcomes onto the categories the policy dispatches on.

use crate::model::{Outcome, RetryReason};

/// Internal classification of an attempt outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// 2xx response.
    Success,
    /// Infrastructure fault worth another attempt (network, timeout, 5xx).
    Transient(RetryReason),
    /// Server throttling, with its retry-after hint (0 = none).
    RateLimited { retry_after_ms: u32 },
    /// 401: credentials need the refresh negotiation.
    AuthChallenge,
    /// Hard block or verification challenge; never retried.
    PermanentBlock,
    /// 4xx other than 401/429.
    PermanentClientError,
    /// 1xx/3xx, which a driver should never surface as a final outcome.
    Unexpected,
}

impl Category {
    /// True for categories the gate would retry if budget and safety allow.
    pub fn is_retryable(self) -> bool {
        matches!(self, Category::Transient(_) | Category::RateLimited { .. })
    }
}

/// Classify an HTTP status code.
///
/// 403 is a plain client error here, not an auth challenge. A 429 seen as a
/// bare status carries no hint; hints only travel via [`Outcome::RateLimited`].
pub fn classify_http_status(code: u16) -> Category {
    match code {
        200..=299 => Category::Success,
        401 => Category::AuthChallenge,
        429 => Category::RateLimited { retry_after_ms: 0 },
        500..=599 => Category::Transient(RetryReason::Network),
        400..=499 => Category::PermanentClientError,
        _ => Category::Unexpected,
    }
}

/// Classify a full attempt outcome. Total: every outcome maps to a category.
pub fn classify(outcome: &Outcome) -> Category {
    match *outcome {
        Outcome::NetworkError => Category::Transient(RetryReason::Network),
        Outcome::TimeoutError => Category::Transient(RetryReason::Timeout),
        Outcome::HttpStatus(code) => classify_http_status(code),
        Outcome::RateLimited { retry_after_ms } => Category::RateLimited { retry_after_ms },
        Outcome::Blocked | Outcome::CaptchaChallenge => Category::PermanentBlock,
    }
}
