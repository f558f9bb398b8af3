//! # Instrumented Algorithm Analysis
//!
//! This library measures what an algorithm does, not just how long it takes:
//! every read, write, comparison, allocation and recursive call made through
//! its storage models is counted, and any of those counts can be capped.
//!
//! ## Layers
//!
//! 1. **Meters**: shared counters, accumulating registries with limit
//!    policies, and a stopwatch
//! 2. **Models**: metered arrays and list/binary nodes with one-shot release,
//!    created only through weight-tracking factories
//! 3. **Collections**: array- and node-backed binary heaps, a stack and a
//!    FIFO queue, all built on the models
//! 4. **Sorting**: classic sorters written against the metered interface
//! 5. **Analysis**: a sandbox that turns limit breaches into failed reports,
//!    and a tester that runs every sorter over every task
//!
//! ## Usage Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use algolab::{standard_sorters, SortTask, SortTester};
//!
//! let tasks = BTreeMap::from([
//!     ("small".to_string(), SortTask::new(32)),
//!     ("tight".to_string(), SortTask::new(32).with_recursion_limit(3)),
//! ]);
//! let reports = SortTester::new().run(&tasks, &standard_sorters()).unwrap();
//! assert_eq!(reports.len(), 16);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod meter;       // Counters, registries, stopwatch
pub mod model;       // Metered arrays and nodes, factories
pub mod collections; // Priority queues, stack, FIFO, comparator
pub mod sorting;     // Sorter trait and implementations
pub mod analysis;    // Sandbox, reports, batch tester

// Re-exports for convenience
pub use meter::{Counter, MeterError, Registry, Resource, Stopwatch};
pub use model::{ArrayModel, ArrayModelFactory, MemoryMeters, ModelError, NodeModelFactory};
pub use collections::{ArrayPriorityQueue, Comparator, LinkedPriorityQueue, PriorityQueue};
pub use sorting::{standard_sorters, SortContext, Sorter};
pub use analysis::{
    render_table, MeterReadings, ReportId, Sandbox, SandboxError, SortReport, SortStatus,
    SortTask, SortTester, TesterConfig,
};
