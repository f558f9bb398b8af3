use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use super::SortTask;

/// Outcome of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortStatus {
    /// Completed within limits and left the target sorted.
    Passed,
    /// Interrupted by a limit, or completed with the target out of order.
    Failed,
}

impl fmt::Display for SortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortStatus::Passed => f.write_str("passed"),
            SortStatus::Failed => f.write_str("failed"),
        }
    }
}

/// Key of a report: which algorithm ran on which task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportId {
    /// Algorithm identifier.
    pub algorithm: String,
    /// Task identifier.
    pub task: String,
}

impl ReportId {
    /// Build an id from the two map keys.
    pub fn new(algorithm: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            task: task.into(),
        }
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[sort report for {} on {}]", self.algorithm, self.task)
    }
}

/// Final value of every meter wired into a trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MeterReadings {
    /// Ordering comparisons.
    pub comparisons: u64,
    /// Hash computations.
    pub hashings: u64,
    /// Equality tests.
    pub equality_tests: u64,
    /// Reads of the target array made by the sorter.
    pub reads: u64,
    /// Writes to the target array made by the sorter.
    pub writes: u64,
    /// Auxiliary models created.
    pub aux_allocations: u64,
    /// Peak outstanding auxiliary weight.
    pub aux_peak: u64,
    /// Total auxiliary weight ever allocated.
    pub aux_total: u64,
    /// Item reads on auxiliary models.
    pub aux_reads: u64,
    /// Item writes on auxiliary models.
    pub aux_writes: u64,
    /// Link reads on auxiliary nodes.
    pub aux_link_reads: u64,
    /// Link writes on auxiliary nodes.
    pub aux_link_writes: u64,
    /// Deepest recursion reached.
    pub recursion_peak: u64,
    /// Time spent inside the sorter.
    pub elapsed: Duration,
}

impl MeterReadings {
    /// All zeros; what an interrupted trial reports.
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Immutable record of one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortReport {
    id: ReportId,
    task: SortTask,
    status: SortStatus,
    detail: String,
    readings: MeterReadings,
}

impl SortReport {
    pub(crate) fn new(
        id: ReportId,
        task: SortTask,
        status: SortStatus,
        detail: impl Into<String>,
        readings: MeterReadings,
    ) -> Self {
        Self {
            id,
            task,
            status,
            detail: detail.into(),
            readings,
        }
    }

    /// Algorithm and task this report belongs to.
    pub fn id(&self) -> &ReportId {
        &self.id
    }

    /// Task the trial ran under.
    pub fn task(&self) -> &SortTask {
        &self.task
    }

    /// Passed or failed.
    pub fn status(&self) -> SortStatus {
        self.status
    }

    /// Whether the trial passed.
    pub fn passed(&self) -> bool {
        self.status == SortStatus::Passed
    }

    /// Human-readable reason for the status.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Meter values; zeroed for interrupted trials.
    pub fn readings(&self) -> &MeterReadings {
        &self.readings
    }
}

impl fmt::Display for SortReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.readings;
        write!(
            f,
            "{:<16} {:<8} {:<7} {:>10} {:>10} {:>10} {:>8} {:>8} {:>6} {:>10.3}  {}",
            self.id.algorithm,
            self.id.task,
            self.status,
            r.comparisons,
            r.reads,
            r.writes,
            r.aux_allocations,
            r.aux_peak,
            r.recursion_peak,
            r.elapsed.as_secs_f64() * 1e3,
            self.detail,
        )
    }
}

/// Plain-text table of reports, one row per trial, in key order.
pub fn render_table(reports: &BTreeMap<ReportId, SortReport>) -> String {
    let mut table = format!(
        "{:<16} {:<8} {:<7} {:>10} {:>10} {:>10} {:>8} {:>8} {:>6} {:>10}  {}\n",
        "algorithm", "task", "status", "compares", "reads", "writes", "allocs", "aux", "depth",
        "ms", "detail",
    );
    for report in reports.values() {
        table.push_str(&format!("{report}\n"));
    }
    table
}
