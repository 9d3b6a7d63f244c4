//! Language-neutral decision vectors.
//!
//! A vector file is JSON of the form `{ "cases": [ { name, input, expected } ] }`.
//! Bindings in other languages replay the same files against the C boundary,
//! so the files are the shared statement of expected behaviour.

mod parse;
mod run;

pub use parse::{Case, CaseInput, Expected, VectorFile};
pub use run::{run, Mismatch, Report};
