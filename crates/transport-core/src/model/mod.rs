//! Value types exchanged with the decision engine.
//!
//! Everything here is constructed fresh by the driver for each attempt and
//! handed to [`crate::retry::Policy::decide`]; nothing is retained between
//! calls. Numeric encodings for the C boundary live in [`crate::abi`], not here.

mod decision;
mod outcome;
mod request;

pub use decision::{Decision, DecisionDetail, DecisionKind, FailReason, RetryReason};
pub use outcome::Outcome;
pub use request::{HttpMethod, RequestContext};
