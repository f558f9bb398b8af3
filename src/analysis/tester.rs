use std::collections::BTreeMap;

use tracing::info;

use super::{random_sample, ReportId, SandboxError, Sandbox, SortReport, SortTask};
use crate::sorting::Sorter;

/// Sample generation settings shared by every trial of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TesterConfig {
    /// Seed for the per-task sample generator.
    pub seed: u64,
    /// Items are drawn from `0..max_item_value`.
    pub max_item_value: i64,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            max_item_value: 1000,
        }
    }
}

impl TesterConfig {
    /// Set the sample seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the exclusive upper bound of sample items (at least 1).
    pub fn with_max_item_value(mut self, max_item_value: i64) -> Self {
        self.max_item_value = max_item_value.max(1);
        self
    }
}

/// Runs every sorter against every task.
#[derive(Debug, Clone, Default)]
pub struct SortTester {
    config: TesterConfig,
}

impl SortTester {
    /// Tester with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tester with an explicit configuration.
    pub fn with_config(config: TesterConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    /// One report per (sorter, task) pair, keyed by the map keys.
    ///
    /// All sorters on a task see the same seeded sample. Stops at the first
    /// invalid task or non-limit sorter failure.
    pub fn run(
        &self,
        tasks: &BTreeMap<String, SortTask>,
        sorters: &BTreeMap<String, Box<dyn Sorter<i64>>>,
    ) -> Result<BTreeMap<ReportId, SortReport>, SandboxError> {
        let mut reports = BTreeMap::new();
        for (task_id, task) in tasks {
            let sandbox = Sandbox::new(task_id.as_str(), task.clone())?;
            let sample = random_sample(self.config.seed, task.items_count, self.config.max_item_value);
            for (algorithm, sorter) in sorters {
                info!(algorithm = %algorithm, task = %task_id, limits = %task, "starting trial");
                let report = sandbox.run(algorithm, sorter.as_ref(), &sample)?;
                info!(
                    algorithm = %algorithm,
                    task = %task_id,
                    status = %report.status(),
                    "finished trial"
                );
                reports.insert(report.id().clone(), report);
            }
        }
        Ok(reports)
    }
}
