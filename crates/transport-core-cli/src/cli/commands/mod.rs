//! CLI command handlers, one per file.

mod config;
pub(super) mod decide;
mod replay;

pub use config::run_config;
pub use decide::{parse_outcome, run_decide, DecideArgs};
pub use replay::run_replay;
