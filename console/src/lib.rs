//! Console plumbing shared by the downlink sender and the telemetry exporter:
//! a bounded re-prompting combinator and tracing setup.

mod errors;
mod logging;
mod prompt;

pub use errors::{Error, Result};
pub use logging::init_tracing;
pub use prompt::{Prompter, DEFAULT_MAX_ATTEMPTS};
