//! Decision core of an HTTP client resilience layer.
//!
//! Given the outcome of one request attempt, decide whether the driver should
//! proceed, retry, refresh credentials and retry, or fail, and why. The core
//! performs no I/O and keeps no state that influences later decisions.

pub mod config;
pub mod logging;

pub mod abi;
pub mod auth;
pub mod engine;
pub mod ffi;
pub mod model;
pub mod retry;
pub mod vectors;

pub use auth::{AuthDecision, RefreshResult};
pub use engine::Engine;
pub use model::{
    Decision, DecisionDetail, DecisionKind, FailReason, HttpMethod, Outcome, RequestContext,
    RetryReason,
};
pub use retry::{decide, ContractError, Policy};
