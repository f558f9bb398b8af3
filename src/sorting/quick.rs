use super::{SortContext, Sorter};
use crate::model::{ArrayModel, ModelError};

/// Recursive quicksort partitioning around the first item of each range.
///
/// No shuffle is applied, so already sorted input recurses linearly deep;
/// a recursion limit on the sandbox makes that visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSorter;

impl QuickSorter {
    /// Sort the half-open range `first..end`.
    fn sort_range<T: Clone>(
        target: &mut ArrayModel<T>,
        ctx: &SortContext<'_, T>,
        first: usize,
        end: usize,
    ) -> Result<(), ModelError> {
        if end - first < 2 {
            return Ok(());
        }
        ctx.checkpoint()?;
        let pivot = Self::partition(target, ctx, first, end - 1)?;

        ctx.enter_recursion()?;
        Self::sort_range(target, ctx, first, pivot)?;
        ctx.leave_recursion()?;

        ctx.enter_recursion()?;
        Self::sort_range(target, ctx, pivot + 1, end)?;
        ctx.leave_recursion()?;
        Ok(())
    }

    /// Partition `first..=last` around `target[first]`; returns its final slot.
    fn partition<T: Clone>(
        target: &mut ArrayModel<T>,
        ctx: &SortContext<'_, T>,
        first: usize,
        last: usize,
    ) -> Result<usize, ModelError> {
        let (mut low, mut high) = (first, last + 1);
        loop {
            loop {
                low += 1;
                if !ctx.less(target, low, first)? || low == last {
                    break;
                }
            }
            loop {
                high -= 1;
                if !ctx.less(target, first, high)? || high == first {
                    break;
                }
            }
            if low >= high {
                break;
            }
            ctx.swap(target, low, high)?;
        }
        ctx.swap(target, first, high)?;
        Ok(high)
    }
}

impl<T: Clone> Sorter<T> for QuickSorter {
    fn name(&self) -> &'static str {
        "quick"
    }

    fn info(&self) -> &'static str {
        "quicksort, first item as pivot, no shuffle"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        Self::sort_range(target, ctx, 0, size)
    }
}
