//! Sorting algorithms over metered arrays
//!
//! Every sorter sees the same interface: the target array plus a
//! [`SortContext`] carrying the comparator, both model factories, the
//! recursion registry and the stopwatch. Limits live inside those objects, so
//! an unbounded run and a limited run call exactly the same code.

mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;
mod shell;

pub use heap::{HeapSorter, LinkedHeapSorter};
pub use insertion::InsertionSorter;
pub use merge::{BottomUpMergeSorter, TopDownMergeSorter};
pub use quick::QuickSorter;
pub use selection::SelectionSorter;
pub use shell::{GapSequence, KnuthGaps, ShellSorter};

use std::collections::BTreeMap;

use crate::collections::Comparator;
use crate::meter::{register_recursive_call, register_recursive_return, Registry, Stopwatch};
use crate::model::{ArrayModel, ArrayModelFactory, ModelError, NodeModelFactory};

/// Everything a sorter may use besides its target.
#[derive(Debug)]
pub struct SortContext<'a, T> {
    comparator: &'a Comparator<T>,
    arrays: &'a ArrayModelFactory,
    nodes: &'a NodeModelFactory,
    recursions: &'a Registry,
    stopwatch: &'a Stopwatch,
}

impl<'a, T> SortContext<'a, T> {
    /// Bundle the run's collaborators.
    pub fn new(
        comparator: &'a Comparator<T>,
        arrays: &'a ArrayModelFactory,
        nodes: &'a NodeModelFactory,
        recursions: &'a Registry,
        stopwatch: &'a Stopwatch,
    ) -> Self {
        Self {
            comparator,
            arrays,
            nodes,
            recursions,
            stopwatch,
        }
    }

    /// Metered item ordering.
    pub fn comparator(&self) -> &'a Comparator<T> {
        self.comparator
    }

    /// Factory for auxiliary arrays.
    pub fn arrays(&self) -> &'a ArrayModelFactory {
        self.arrays
    }

    /// Factory for auxiliary nodes.
    pub fn nodes(&self) -> &'a NodeModelFactory {
        self.nodes
    }

    /// Cooperative time check; call once per outer iteration or recursive call.
    #[inline]
    pub fn checkpoint(&self) -> Result<(), ModelError> {
        self.stopwatch.check()?;
        Ok(())
    }

    /// Record entry into a recursive call.
    pub fn enter_recursion(&self) -> Result<(), ModelError> {
        register_recursive_call(self.recursions)?;
        Ok(())
    }

    /// Record return from a recursive call.
    pub fn leave_recursion(&self) -> Result<(), ModelError> {
        register_recursive_return(self.recursions)?;
        Ok(())
    }
}

impl<T: Clone> SortContext<'_, T> {
    /// `target[first] < target[second]`.
    pub fn less(
        &self,
        target: &ArrayModel<T>,
        first: usize,
        second: usize,
    ) -> Result<bool, ModelError> {
        Ok(self
            .comparator
            .less(&target.read(first)?, &target.read(second)?))
    }

    /// Exchange two slots.
    pub fn swap(
        &self,
        target: &mut ArrayModel<T>,
        first: usize,
        second: usize,
    ) -> Result<(), ModelError> {
        let buffer = target.read(first)?;
        let other = target.read(second)?;
        target.write(first, other)?;
        target.write(second, buffer)
    }

    /// Exchange two slots if `target[first] < target[second]`; returns whether it did.
    pub fn swap_if_less(
        &self,
        target: &mut ArrayModel<T>,
        first: usize,
        second: usize,
    ) -> Result<bool, ModelError> {
        let first_item = target.read(first)?;
        let second_item = target.read(second)?;
        if !self.comparator.less(&first_item, &second_item) {
            return Ok(false);
        }
        target.write(first, second_item)?;
        target.write(second, first_item)?;
        Ok(true)
    }
}

/// A sorting algorithm runnable in the sandbox.
pub trait Sorter<T> {
    /// Short stable identifier.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn info(&self) -> &'static str;

    /// Sort `target` into non-decreasing order.
    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>)
        -> Result<(), ModelError>;
}

/// Every built-in sorter keyed by its name.
pub fn standard_sorters<T: Clone + 'static>() -> BTreeMap<String, Box<dyn Sorter<T>>> {
    let sorters: Vec<Box<dyn Sorter<T>>> = vec![
        Box::new(InsertionSorter),
        Box::new(SelectionSorter),
        Box::new(ShellSorter::new(KnuthGaps)),
        Box::new(TopDownMergeSorter),
        Box::new(BottomUpMergeSorter),
        Box::new(QuickSorter),
        Box::new(HeapSorter),
        Box::new(LinkedHeapSorter),
    ];
    sorters
        .into_iter()
        .map(|sorter| (sorter.name().to_string(), sorter))
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the sorter unit tests.

    use super::*;
    use crate::collections::ComparisonMeters;
    use crate::model::{ArrayMeters, MemoryMeters, NodeMeters};

    pub(crate) struct Harness {
        pub comparator: Comparator<i64>,
        pub arrays: ArrayModelFactory,
        pub nodes: NodeModelFactory,
        pub recursions: Registry,
        pub stopwatch: Stopwatch,
        pub target_meters: ArrayMeters,
        pub memory: MemoryMeters,
    }

    impl Harness {
        pub(crate) fn new() -> Self {
            let memory = MemoryMeters::new();
            Self {
                comparator: Comparator::natural(ComparisonMeters::new()),
                arrays: ArrayModelFactory::new(ArrayMeters::new(), memory.clone()),
                nodes: NodeModelFactory::new(NodeMeters::new(), memory.clone()),
                recursions: Registry::new(0),
                stopwatch: Stopwatch::new(),
                target_meters: ArrayMeters::new(),
                memory,
            }
        }

        pub(crate) fn context(&self) -> SortContext<'_, i64> {
            SortContext::new(
                &self.comparator,
                &self.arrays,
                &self.nodes,
                &self.recursions,
                &self.stopwatch,
            )
        }

        pub(crate) fn target(&self, items: &[i64]) -> ArrayModel<i64> {
            let factory = ArrayModelFactory::new(self.target_meters.clone(), MemoryMeters::new());
            let mut target = factory.create(items.len()).unwrap();
            for (index, item) in items.iter().enumerate() {
                target.write(index, *item).unwrap();
            }
            target
        }

        pub(crate) fn run(&self, sorter: &dyn Sorter<i64>, items: &[i64]) -> Vec<i64> {
            let mut target = self.target(items);
            sorter.sort(&mut target, &self.context()).unwrap();
            let sorted: Result<Vec<_>, _> = target.iter().collect();
            sorted.unwrap()
        }
    }

    pub(crate) const SAMPLES: &[&[i64]] = &[
        &[],
        &[1],
        &[2, 1],
        &[3, 1, 2],
        &[5, 5, 5, 5],
        &[9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
        &[4, -2, 17, 0, 4, 33, -8, 12, 12, 1, 7, 3, 99, -40, 5, 6, 2],
    ];

    pub(crate) fn assert_sorts(sorter: &dyn Sorter<i64>) {
        for sample in SAMPLES {
            let harness = Harness::new();
            let mut expected = sample.to_vec();
            expected.sort();
            assert_eq!(
                harness.run(sorter, sample),
                expected,
                "{} failed on {:?}",
                sorter.name(),
                sample
            );
            assert_eq!(
                harness.memory.outstanding(),
                0,
                "{} leaked auxiliary memory",
                sorter.name()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Harness;
    use super::*;

    #[test]
    fn swap_if_less_reports_and_meters() {
        let harness = Harness::new();
        let ctx = harness.context();
        let mut target = harness.target(&[2, 1]);

        assert_eq!(ctx.swap_if_less(&mut target, 1, 0), Ok(true));
        assert_eq!(ctx.swap_if_less(&mut target, 1, 0), Ok(false));
        assert_eq!(target.read(0), Ok(1));

        // 2 loading writes + 2 swap writes; 4 reads by the swaps + 1 check.
        assert_eq!(harness.target_meters.writes.value(), 4);
        assert_eq!(harness.target_meters.reads.value(), 5);
        assert_eq!(harness.comparator.meters().comparisons.value(), 2);
    }

    #[test]
    fn standard_sorters_are_keyed_by_name() {
        let sorters = standard_sorters::<i64>();
        assert_eq!(sorters.len(), 8);
        for (name, sorter) in &sorters {
            assert_eq!(name, sorter.name());
            assert!(!sorter.info().is_empty());
        }
    }
}
