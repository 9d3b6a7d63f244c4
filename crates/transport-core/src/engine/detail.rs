//! Per-engine scratch holding the detail of the most recent decision.

use crate::model::{DecisionDetail, FailReason, RetryReason};
use crate::retry::ContractError;

/// Detail of the last `decide` call, overwritten on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailStore {
    detail: DecisionDetail,
    error: Option<ContractError>,
}

impl DetailStore {
    pub fn record(&mut self, detail: DecisionDetail) {
        self.detail = detail;
        self.error = None;
    }

    /// A rejected call leaves no detail behind, only the violation.
    pub fn record_error(&mut self, error: ContractError) {
        self.detail = DecisionDetail::default();
        self.error = Some(error);
    }

    pub fn detail(&self) -> DecisionDetail {
        self.detail
    }

    pub fn retry_after_ms(&self) -> u32 {
        self.detail.retry_after_ms
    }

    pub fn retry_reason(&self) -> Option<RetryReason> {
        self.detail.retry_reason
    }

    pub fn fail_reason(&self) -> Option<FailReason> {
        self.detail.fail_reason
    }

    pub fn fail_retryable(&self) -> bool {
        self.detail.fail_retryable
    }

    pub fn error(&self) -> Option<ContractError> {
        self.error
    }
}
