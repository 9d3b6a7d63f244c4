//! Retry policy: outcome classification, the idempotency/budget gate, and
//! the orchestration that turns one attempt's outcome into a [`Decision`].
//!
//! Everything here is a pure function of its inputs. State that must survive
//! between calls (the last decision's detail) belongs to [`crate::engine`].
//!
//! [`Decision`]: crate::model::Decision

mod classify;
mod error;
mod gate;
mod policy;

pub use classify::{classify, classify_http_status, Category};
pub use error::ContractError;
pub use gate::admit_retry;
pub use policy::{decide, Policy};
