//! CLI library components for cohort survival analysis.

pub mod logging;
pub mod pipeline;
pub mod types;

pub use pipeline::run_workdir;
pub use types::{RunConfig, RunResult};
