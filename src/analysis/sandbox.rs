use tracing::{debug, warn};

use super::{MeterReadings, ReportId, SandboxError, SortReport, SortStatus, SortTask};
use crate::collections::{Comparator, ComparisonMeters};
use crate::meter::{MaxTotalLimit, Registry, Resource, Stopwatch, TimeLimit};
use crate::model::{
    ArrayMeters, ArrayModel, ArrayModelFactory, MemoryMeters, ModelError, NodeMeters,
    NodeModelFactory,
};
use crate::sorting::{SortContext, Sorter};

const NOT_SORTED: &str = "target array is not sorted";

/// Runs sorters against one task under its limits.
#[derive(Debug, Clone)]
pub struct Sandbox {
    task_id: String,
    task: SortTask,
}

/// Meters wired into a single trial.
struct Trial<T> {
    comparator: Comparator<T>,
    target_meters: ArrayMeters,
    memory: MemoryMeters,
    arrays: ArrayModelFactory,
    nodes: NodeModelFactory,
    recursions: Registry,
    stopwatch: Stopwatch,
}

impl<T: Ord + 'static> Trial<T> {
    fn wire(task: &SortTask) -> Self {
        let memory = MemoryMeters::with_limit(task.aux_memory_limit);
        let recursions = match task.recursion_limit {
            Some(limit) => Registry::with_policy(0, MaxTotalLimit::new(Resource::Recursion, limit)),
            None => Registry::new(0),
        };
        let stopwatch = match task.time_limit {
            Some(limit) => Stopwatch::with_policy(TimeLimit(limit)),
            None => Stopwatch::new(),
        };
        Self {
            comparator: Comparator::natural(ComparisonMeters::new()),
            target_meters: ArrayMeters::new(),
            arrays: ArrayModelFactory::new(ArrayMeters::new(), memory.clone()),
            nodes: NodeModelFactory::new(NodeMeters::new(), memory.clone()),
            memory,
            recursions,
            stopwatch,
        }
    }

    /// Readings with the sandbox's own `len` loading writes and verification reads removed.
    fn readings(&self, len: u64) -> MeterReadings {
        let comparisons = self.comparator.meters();
        let arrays = self.arrays.meters();
        let nodes = self.nodes.meters();
        MeterReadings {
            comparisons: comparisons.comparisons.value(),
            hashings: comparisons.hashings.value(),
            equality_tests: comparisons.equality_tests.value(),
            reads: self.target_meters.reads.value().saturating_sub(len),
            writes: self.target_meters.writes.value().saturating_sub(len),
            aux_allocations: self.memory.allocations.count(),
            aux_peak: self.memory.usage.peak(),
            aux_total: self.memory.allocations.total().max(0) as u64,
            aux_reads: arrays.reads.value() + nodes.reads.value(),
            aux_writes: arrays.writes.value() + nodes.writes.value(),
            aux_link_reads: nodes.link_reads.value(),
            aux_link_writes: nodes.link_writes.value(),
            recursion_peak: self.recursions.peak(),
            elapsed: self.stopwatch.elapsed(),
        }
    }
}

impl Sandbox {
    /// Sandbox for the task registered as `task_id`.
    pub fn new(task_id: impl Into<String>, task: SortTask) -> Result<Self, SandboxError> {
        task.validate()?;
        Ok(Self {
            task_id: task_id.into(),
            task,
        })
    }

    /// Task this sandbox enforces.
    pub fn task(&self) -> &SortTask {
        &self.task
    }

    /// Run `sorter` (registered as `algorithm`) over a copy of `sample`.
    ///
    /// Limit breaches and unsorted results become failed reports; any other
    /// model failure is returned as [`SandboxError::Algorithm`].
    pub fn run<T: Clone + Ord + 'static>(
        &self,
        algorithm: &str,
        sorter: &dyn Sorter<T>,
        sample: &[T],
    ) -> Result<SortReport, SandboxError> {
        if sample.len() != self.task.items_count {
            return Err(SandboxError::invalid_task(format!(
                "sample holds {} items, task {} expects {}",
                sample.len(),
                self.task_id,
                self.task.items_count
            )));
        }
        let id = ReportId::new(algorithm, self.task_id.as_str());
        let trial = Trial::wire(&self.task);

        let target_factory = ArrayModelFactory::new(trial.target_meters.clone(), MemoryMeters::new());
        let mut target = target_factory.create(sample.len())?;
        for (index, item) in sample.iter().enumerate() {
            target.write(index, item.clone())?;
        }

        let ctx = SortContext::new(
            &trial.comparator,
            &trial.arrays,
            &trial.nodes,
            &trial.recursions,
            &trial.stopwatch,
        );
        trial.stopwatch.start();
        let outcome = sorter.sort(&mut target, &ctx);
        trial.stopwatch.stop();

        match outcome {
            Ok(()) => {}
            Err(error) if error.is_limit_breach() => {
                warn!(%id, %error, "trial interrupted");
                return Ok(SortReport::new(
                    id,
                    self.task.clone(),
                    SortStatus::Failed,
                    error.to_string(),
                    MeterReadings::zeroed(),
                ));
            }
            Err(source) => {
                return Err(SandboxError::Algorithm {
                    algorithm: algorithm.to_string(),
                    source,
                })
            }
        }

        let sorted = is_sorted(&target).map_err(|source| SandboxError::Algorithm {
            algorithm: algorithm.to_string(),
            source,
        })?;
        let readings = trial.readings(sample.len() as u64);
        let (status, detail) = if sorted {
            debug!(%id, comparisons = readings.comparisons, "trial passed");
            (SortStatus::Passed, "passed")
        } else {
            warn!(%id, "{NOT_SORTED}");
            (SortStatus::Failed, NOT_SORTED)
        };
        Ok(SortReport::new(id, self.task.clone(), status, detail, readings))
    }
}

/// One metered pass over `target` checking non-decreasing order.
fn is_sorted<T: Clone + Ord>(target: &ArrayModel<T>) -> Result<bool, ModelError> {
    let mut previous: Option<T> = None;
    let mut sorted = true;
    for item in target.iter() {
        let item = item?;
        if previous.as_ref().is_some_and(|prev| *prev > item) {
            sorted = false;
        }
        previous = Some(item);
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::{InsertionSorter, TopDownMergeSorter};
    use std::time::Duration;

    /// Leaves the target untouched.
    struct Idle;

    impl Sorter<i64> for Idle {
        fn name(&self) -> &'static str {
            "idle"
        }
        fn info(&self) -> &'static str {
            "does nothing"
        }
        fn sort(&self, _: &mut ArrayModel<i64>, _: &SortContext<'_, i64>) -> Result<(), ModelError> {
            Ok(())
        }
    }

    /// Reads past the end of the target.
    struct OutOfBounds;

    impl Sorter<i64> for OutOfBounds {
        fn name(&self) -> &'static str {
            "out-of-bounds"
        }
        fn info(&self) -> &'static str {
            "reads one slot too far"
        }
        fn sort(&self, target: &mut ArrayModel<i64>, _: &SortContext<'_, i64>) -> Result<(), ModelError> {
            let size = target.size()?;
            target.read(size).map(|_| ())
        }
    }

    /// Checks the clock until the limit fires.
    struct Spin;

    impl Sorter<i64> for Spin {
        fn name(&self) -> &'static str {
            "spin"
        }
        fn info(&self) -> &'static str {
            "busy-waits on checkpoints"
        }
        fn sort(&self, _: &mut ArrayModel<i64>, ctx: &SortContext<'_, i64>) -> Result<(), ModelError> {
            loop {
                ctx.checkpoint()?;
                std::thread::sleep(Duration::from_millis(1));
            }
        }
    }

    #[test]
    fn passing_trial_excludes_harness_traffic() {
        let sandbox = Sandbox::new("t", SortTask::new(3)).unwrap();
        let report = sandbox.run("insertion", &InsertionSorter, &[3, 1, 2]).unwrap();
        assert!(report.passed());
        assert_eq!(report.readings().reads, 6);
        assert_eq!(report.readings().writes, 4);
        assert_eq!(report.readings().comparisons, 3);
    }

    #[test]
    fn unsorted_target_fails_with_readings() {
        let sandbox = Sandbox::new("t", SortTask::new(3)).unwrap();
        let report = sandbox.run("idle", &Idle, &[2, 1, 3]).unwrap();
        assert_eq!(report.status(), SortStatus::Failed);
        assert_eq!(report.detail(), NOT_SORTED);
        assert_eq!(report.readings().reads, 0);
    }

    #[test]
    fn recursion_breach_zeroes_readings() {
        let sandbox = Sandbox::new("t", SortTask::new(8).with_recursion_limit(2)).unwrap();
        let report = sandbox
            .run("merge", &TopDownMergeSorter, &[8, 7, 6, 5, 4, 3, 2, 1])
            .unwrap();
        assert_eq!(report.status(), SortStatus::Failed);
        assert!(report.detail().contains("recursion"));
        assert_eq!(*report.readings(), MeterReadings::zeroed());
    }

    #[test]
    fn time_breach_fails_the_trial() {
        let sandbox =
            Sandbox::new("t", SortTask::new(1).with_time_limit(Duration::from_millis(5))).unwrap();
        let report = sandbox.run("spin", &Spin, &[1]).unwrap();
        assert_eq!(report.status(), SortStatus::Failed);
        assert!(report.detail().contains("time"));
    }

    #[test]
    fn other_errors_propagate() {
        let sandbox = Sandbox::new("t", SortTask::new(2)).unwrap();
        let error = sandbox.run("oob", &OutOfBounds, &[1, 2]).unwrap_err();
        assert!(matches!(
            error,
            SandboxError::Algorithm {
                source: ModelError::IndexOutOfRange { index: 2, len: 2 },
                ..
            }
        ));
    }

    #[test]
    fn sample_length_must_match_task() {
        let sandbox = Sandbox::new("t", SortTask::new(4)).unwrap();
        assert!(matches!(
            sandbox.run("insertion", &InsertionSorter, &[1, 2]),
            Err(SandboxError::InvalidTask(_))
        ));
    }
}
