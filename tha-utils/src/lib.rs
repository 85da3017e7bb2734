//! Shared error taxonomy for the timed-hybrid-automaton builder.
mod errors;

pub use errors::{AccessError, BuildError, BuildResult};
