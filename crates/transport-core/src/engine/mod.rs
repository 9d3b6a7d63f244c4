//! Stateful engine instance for callers that read decision detail field by
//! field.
//!
//! Rust callers should prefer [`crate::retry::Policy::decide`], whose
//! [`Decision`] already carries its detail. `Engine` exists for the C
//! boundary: `decide` stores the detail and the narrow accessors read it back.
//! The accessors are only meaningful immediately after the `decide` call they
//! follow; one engine must not be shared by concurrent attempts without
//! serializing `decide` and the reads as one unit. `&mut self` enforces this
//! on the Rust side.

mod detail;

pub use detail::DetailStore;

use crate::auth::{AuthDecision, RefreshResult};
use crate::config::EngineConfig;
use crate::model::{Decision, DecisionDetail, FailReason, Outcome, RequestContext, RetryReason};
use crate::retry::{ContractError, Policy};

#[derive(Debug, Clone, Default)]
pub struct Engine {
    policy: Policy,
    store: DetailStore,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: Policy) -> Self {
        Self {
            policy,
            store: DetailStore::default(),
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::with_policy(Policy::from_config(cfg))
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Decide and record the detail, replacing whatever the previous call left.
    pub fn decide(
        &mut self,
        ctx: &RequestContext,
        outcome: &Outcome,
        auth_decision: Option<AuthDecision>,
        refresh: Option<RefreshResult>,
    ) -> Result<Decision, ContractError> {
        match self.policy.decide(ctx, outcome, auth_decision, refresh) {
            Ok(decision) => {
                self.store.record(decision.detail());
                Ok(decision)
            }
            Err(e) => {
                self.store.record_error(e);
                Err(e)
            }
        }
    }

    /// Record a violation detected before the policy ran (e.g. while
    /// decoding foreign input).
    pub fn reject(&mut self, error: ContractError) {
        tracing::warn!(error = %error, "rejected decide call");
        self.store.record_error(error);
    }

    pub fn last_detail(&self) -> DecisionDetail {
        self.store.detail()
    }

    pub fn last_retry_after_ms(&self) -> u32 {
        self.store.retry_after_ms()
    }

    pub fn last_retry_reason(&self) -> Option<RetryReason> {
        self.store.retry_reason()
    }

    pub fn last_fail_reason(&self) -> Option<FailReason> {
        self.store.fail_reason()
    }

    pub fn last_fail_retryable(&self) -> bool {
        self.store.fail_retryable()
    }

    pub fn last_error(&self) -> Option<ContractError> {
        self.store.error()
    }
}
