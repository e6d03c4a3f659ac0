//! Batch orchestrator: the sequential send-and-record loop.
//!
//! One run selects the eligible recipients, walks them in order while
//! rotating mail providers, records each outcome in the store, and
//! reports to the operator channel. Sends are strictly sequential: the
//! pacing sleep between them is the only rate limit the providers get.

mod config;
mod pacing;
mod runner;
mod selection;
mod types;

pub use config::BatchConfig;
pub use pacing::Pacing;
pub use runner::BatchRunner;
pub use selection::build_working_set;
pub use types::{BatchError, RunReport};
