//! Replay vector cases against a policy and collect mismatches.

use anyhow::Result;

use crate::model::Decision;
use crate::retry::Policy;

use super::parse::{Case, Expected, VectorFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub total: usize,
    pub mismatches: Vec<Mismatch>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.total - self.mismatches.len()
    }
}

/// Evaluate every case. Malformed cases are reported as mismatches.
pub fn run(policy: &Policy, file: &VectorFile) -> Report {
    let mut report = Report {
        total: file.cases.len(),
        mismatches: Vec::new(),
    };
    for case in &file.cases {
        if let Err(e) = check(policy, case) {
            tracing::debug!(case = %case.name, error = %e, "vector mismatch");
            report.mismatches.push(Mismatch {
                name: case.name.clone(),
                message: format!("{e:#}"),
            });
        }
    }
    report
}

fn check(policy: &Policy, case: &Case) -> Result<()> {
    let ctx = case.input.context()?;
    let outcome = case.input.outcome()?;
    let auth_decision = case.input.auth_decision()?;
    let refresh = case.input.refresh()?;

    let decision = policy.decide(&ctx, &outcome, auth_decision, refresh)?;
    compare(&case.expected, &decision)
}

fn compare(expected: &Expected, decision: &Decision) -> Result<()> {
    let detail = decision.detail();
    if decision.kind() != expected.action {
        anyhow::bail!("expected {}, got {:?}", expected.action, decision);
    }
    if let Some(reason) = expected.retry_reason {
        anyhow::ensure!(
            detail.retry_reason == Some(reason),
            "expected retry_reason {reason:?}, got {:?}",
            detail.retry_reason
        );
    }
    if let Some(reason) = expected.fail_reason {
        anyhow::ensure!(
            detail.fail_reason == Some(reason),
            "expected fail_reason {reason:?}, got {:?}",
            detail.fail_reason
        );
    }
    if let Some(ms) = expected.retry_after_ms {
        anyhow::ensure!(
            detail.retry_after_ms == ms,
            "expected retry_after_ms {ms}, got {}",
            detail.retry_after_ms
        );
    }
    if let Some(retryable) = expected.fail_retryable {
        anyhow::ensure!(
            detail.fail_retryable == retryable,
            "expected fail_retryable {retryable}, got {}",
            detail.fail_retryable
        );
    }
    Ok(())
}
