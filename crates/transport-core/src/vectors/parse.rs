//! Vector file schema and conversion into engine inputs.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::auth::{AuthDecision, RefreshResult};
use crate::model::{DecisionKind, FailReason, HttpMethod, Outcome, RequestContext, RetryReason};

#[derive(Debug, Clone, Deserialize)]
pub struct VectorFile {
    pub cases: Vec<Case>,
}

impl VectorFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("read vectors: {}", path.display()))?;
        Self::from_slice(&bytes).with_context(|| format!("parse vectors: {}", path.display()))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Case {
    pub name: String,
    pub input: CaseInput,
    pub expected: Expected,
}

/// Inputs of one case. Omitted fields default to a first GET attempt out of 3.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseInput {
    pub method: Option<String>,
    pub attempt: Option<u8>,
    pub max_attempts: Option<u8>,
    pub idempotency_key: Option<String>,
    pub allow_non_idempotent_retry: Option<bool>,
    /// Transport or semantic outcome name; mutually exclusive with `status`.
    pub error: Option<String>,
    pub status: Option<u16>,
    pub retry_after_ms: Option<u32>,
    pub auth_decision: Option<String>,
    /// "SUCCESS" or "FAILURE".
    pub refresh_result: Option<String>,
}

/// Expected decision. Only `action` is mandatory; other fields are checked
/// when present.
#[derive(Debug, Clone, Deserialize)]
pub struct Expected {
    pub action: DecisionKind,
    pub retry_reason: Option<RetryReason>,
    pub fail_reason: Option<FailReason>,
    pub retry_after_ms: Option<u32>,
    pub fail_retryable: Option<bool>,
}

impl CaseInput {
    pub fn context(&self) -> Result<RequestContext> {
        let method = match self.method.as_deref() {
            Some(m) => m.parse::<HttpMethod>().map_err(|e| anyhow!(e))?,
            None => HttpMethod::Get,
        };
        Ok(RequestContext {
            method,
            attempt: self.attempt.unwrap_or(1),
            max_attempts: self.max_attempts.unwrap_or(3),
            allow_non_idempotent_retry: self.allow_non_idempotent_retry.unwrap_or(false),
            idempotency_key: self.idempotency_key.clone(),
        })
    }

    pub fn outcome(&self) -> Result<Outcome> {
        match (self.error.as_deref(), self.status) {
            (Some(_), Some(_)) => bail!("both `error` and `status` given"),
            (None, Some(status)) => Ok(Outcome::HttpStatus(status)),
            (Some(err), None) => match err {
                "NetworkError" => Ok(Outcome::NetworkError),
                "TimeoutError" => Ok(Outcome::TimeoutError),
                "RateLimited" => Ok(Outcome::RateLimited {
                    retry_after_ms: self.retry_after_ms.unwrap_or(0),
                }),
                "Blocked" => Ok(Outcome::Blocked),
                "Captcha" | "CaptchaChallenge" => Ok(Outcome::CaptchaChallenge),
                other => bail!("unknown error outcome: {other}"),
            },
            (None, None) => bail!("case has neither `error` nor `status`"),
        }
    }

    pub fn auth_decision(&self) -> Result<Option<AuthDecision>> {
        match self.auth_decision.as_deref() {
            None => Ok(None),
            Some("RefreshAndRetry") => Ok(Some(AuthDecision::RefreshAndRetry)),
            Some("Fail") => Ok(Some(AuthDecision::Fail)),
            Some(other) => bail!("unknown auth decision: {other}"),
        }
    }

    pub fn refresh(&self) -> Result<Option<RefreshResult>> {
        match self.refresh_result.as_deref() {
            None => Ok(None),
            Some("SUCCESS") => Ok(Some(RefreshResult::Succeeded)),
            Some("FAILURE") => Ok(Some(RefreshResult::Failed)),
            Some(other) => bail!("unknown refresh result: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_case_with_defaults() {
        let json = br#"{ "cases": [
            { "name": "ok", "input": { "status": 200 }, "expected": { "action": "PROCEED" } }
        ] }"#;
        let file = VectorFile::from_slice(json).unwrap();
        let case = &file.cases[0];
        let ctx = case.input.context().unwrap();
        assert_eq!(ctx, RequestContext::new(HttpMethod::Get, 1, 3));
        assert_eq!(case.input.outcome().unwrap(), Outcome::HttpStatus(200));
        assert_eq!(case.expected.action, DecisionKind::Proceed);
    }

    #[test]
    fn parses_detail_expectations() {
        let json = br#"{ "cases": [
            { "name": "rl",
              "input": { "error": "RateLimited", "retry_after_ms": 3000 },
              "expected": { "action": "RETRY", "retry_reason": "RATE_LIMITED", "retry_after_ms": 3000 } },
            { "name": "exhausted",
              "input": { "attempt": 3, "error": "TimeoutError" },
              "expected": { "action": "FAIL", "fail_reason": "MAX_ATTEMPTS_EXCEEDED", "fail_retryable": true } }
        ] }"#;
        let file = VectorFile::from_slice(json).unwrap();
        assert_eq!(file.cases[0].expected.retry_reason, Some(RetryReason::RateLimited));
        assert_eq!(
            file.cases[0].input.outcome().unwrap(),
            Outcome::RateLimited {
                retry_after_ms: 3000
            }
        );
        assert_eq!(
            file.cases[1].expected.fail_reason,
            Some(FailReason::MaxAttemptsExceeded)
        );
        assert_eq!(file.cases[1].expected.fail_retryable, Some(true));
    }

    #[test]
    fn rejects_ambiguous_or_missing_outcome() {
        let both = CaseInput {
            error: Some("Blocked".into()),
            status: Some(500),
            ..CaseInput::default()
        };
        assert!(both.outcome().is_err());
        assert!(CaseInput::default().outcome().is_err());
    }

    #[test]
    fn unknown_action_is_a_parse_error() {
        let json = br#"{ "cases": [
            { "name": "x", "input": { "status": 200 }, "expected": { "action": "MAYBE" } }
        ] }"#;
        assert!(VectorFile::from_slice(json).is_err());
    }
}
