//! Merge sorts sharing one auxiliary array per run

use super::{SortContext, Sorter};
use crate::model::{ArrayModel, ModelError};

/// Merge the sorted runs `[first, middle]` and `(middle, last]` through `aux`.
fn merge<T: Clone>(
    target: &mut ArrayModel<T>,
    aux: &mut ArrayModel<T>,
    ctx: &SortContext<'_, T>,
    first: usize,
    middle: usize,
    last: usize,
) -> Result<(), ModelError> {
    for index in first..=last {
        aux.write(index, target.read(index)?)?;
    }
    let comparator = ctx.comparator();
    let (mut left, mut right) = (first, middle + 1);
    for index in first..=last {
        let item = if left > middle {
            right += 1;
            aux.read(right - 1)?
        } else if right > last {
            left += 1;
            aux.read(left - 1)?
        } else {
            let left_item = aux.read(left)?;
            let right_item = aux.read(right)?;
            if comparator.less(&right_item, &left_item) {
                right += 1;
                right_item
            } else {
                left += 1;
                left_item
            }
        };
        target.write(index, item)?;
    }
    Ok(())
}

/// Recursive halving merge sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopDownMergeSorter;

impl TopDownMergeSorter {
    fn sort_range<T: Clone>(
        target: &mut ArrayModel<T>,
        aux: &mut ArrayModel<T>,
        ctx: &SortContext<'_, T>,
        first: usize,
        last: usize,
    ) -> Result<(), ModelError> {
        if last <= first {
            return Ok(());
        }
        ctx.checkpoint()?;
        let middle = first + (last - first) / 2;

        ctx.enter_recursion()?;
        Self::sort_range(target, aux, ctx, first, middle)?;
        ctx.leave_recursion()?;

        ctx.enter_recursion()?;
        Self::sort_range(target, aux, ctx, middle + 1, last)?;
        ctx.leave_recursion()?;

        merge(target, aux, ctx, first, middle, last)
    }
}

impl<T: Clone> Sorter<T> for TopDownMergeSorter {
    fn name(&self) -> &'static str {
        "merge-top-down"
    }

    fn info(&self) -> &'static str {
        "top-down merge sort with one auxiliary array"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        if size < 2 {
            return Ok(());
        }
        let mut aux = ctx.arrays().create(size)?;
        Self::sort_range(target, &mut aux, ctx, 0, size - 1)?;
        aux.destruct()?;
        Ok(())
    }
}

/// Iterative merge sort over doubling run widths.
#[derive(Debug, Clone, Copy, Default)]
pub struct BottomUpMergeSorter;

impl<T: Clone> Sorter<T> for BottomUpMergeSorter {
    fn name(&self) -> &'static str {
        "merge-bottom-up"
    }

    fn info(&self) -> &'static str {
        "bottom-up merge sort with one auxiliary array"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        if size < 2 {
            return Ok(());
        }
        let mut aux = ctx.arrays().create(size)?;
        let mut width = 1;
        while width < size {
            ctx.checkpoint()?;
            let mut first = 0;
            while first < size - width {
                let last = (first + 2 * width).min(size) - 1;
                merge(target, &mut aux, ctx, first, first + width - 1, last)?;
                first += 2 * width;
            }
            width *= 2;
        }
        aux.destruct()?;
        Ok(())
    }
}
