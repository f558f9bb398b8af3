//! Sorting through the priority queues
//!
//! Both sorters drain a max-queue from the back of the target, so the
//! queue's allocation pattern is what separates them in a report.

use super::{SortContext, Sorter};
use crate::collections::{ArrayPriorityQueue, LinkedPriorityQueue, PriorityQueue};
use crate::model::{ArrayModel, ModelError};

fn drain_into<T: Clone>(
    queue: &mut impl PriorityQueue<T>,
    target: &mut ArrayModel<T>,
    ctx: &SortContext<'_, T>,
    size: usize,
) -> Result<(), ModelError> {
    for index in 0..size {
        ctx.checkpoint()?;
        queue.enqueue(target.read(index)?)?;
    }
    for index in (0..size).rev() {
        ctx.checkpoint()?;
        target.write(index, queue.dequeue()?)?;
    }
    Ok(())
}

/// Heap sort through an [`ArrayPriorityQueue`] sized for the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSorter;

impl<T: Clone> Sorter<T> for HeapSorter {
    fn name(&self) -> &'static str {
        "heap"
    }

    fn info(&self) -> &'static str {
        "heap sort through an array-backed priority queue"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        let mut queue =
            ArrayPriorityQueue::with_capacity(size, ctx.comparator().clone(), ctx.arrays().clone());
        drain_into(&mut queue, target, ctx, size)?;
        queue.release()
    }
}

/// Heap sort through a [`LinkedPriorityQueue`]; every item costs one binary node.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedHeapSorter;

impl<T: Clone> Sorter<T> for LinkedHeapSorter {
    fn name(&self) -> &'static str {
        "linked-heap"
    }

    fn info(&self) -> &'static str {
        "heap sort through a node-backed priority queue"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        let mut queue = LinkedPriorityQueue::new(ctx.comparator().clone(), ctx.nodes().clone());
        drain_into(&mut queue, target, ctx, size)?;
        queue.release()
    }
}
