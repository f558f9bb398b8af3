//! Sandboxed sort trials and their reports
//!
//! A [`Sandbox`] runs one sorter against one [`SortTask`]: it wires fresh
//! meters and limit policies, loads the sample, runs the sorter, verifies
//! the result and condenses everything into an immutable [`SortReport`].
//! [`SortTester`] drives the sandbox over every task and sorter pair.

mod report;
mod sample;
mod sandbox;
mod task;
mod tester;

pub use report::{render_table, MeterReadings, ReportId, SortReport, SortStatus};
pub use sample::random_sample;
pub use sandbox::Sandbox;
pub use task::SortTask;
pub use tester::{SortTester, TesterConfig};

use thiserror::Error;

use crate::model::ModelError;

/// Errors that abort a trial instead of producing a report.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Task or tester configuration rejected before running anything.
    #[error("invalid sort task: {0}")]
    InvalidTask(String),

    /// The sorter failed for a reason other than a configured limit.
    #[error("algorithm {algorithm} failed: {source}")]
    Algorithm {
        /// Identifier the sorter was registered under.
        algorithm: String,
        /// Underlying model failure.
        #[source]
        source: ModelError,
    },

    /// The sandbox itself could not load the sample.
    #[error("sandbox model failure: {0}")]
    Model(#[from] ModelError),
}

impl SandboxError {
    /// Helper for rejecting a task.
    pub fn invalid_task(msg: impl Into<String>) -> Self {
        SandboxError::InvalidTask(msg.into())
    }
}
