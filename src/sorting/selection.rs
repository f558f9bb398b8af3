use super::{SortContext, Sorter};
use crate::model::{ArrayModel, ModelError};

/// Moves the minimum of the unsorted suffix to its front.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSorter;

impl<T: Clone> Sorter<T> for SelectionSorter {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn info(&self) -> &'static str {
        "selection sort"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        for pivot in 0..size {
            ctx.checkpoint()?;
            let mut minimum = pivot;
            for index in pivot + 1..size {
                if ctx.less(target, index, minimum)? {
                    minimum = index;
                }
            }
            ctx.swap(target, pivot, minimum)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::testing::{assert_sorts, Harness};

    #[test]
    fn sorts_samples() {
        assert_sorts(&SelectionSorter);
    }

    #[test]
    fn compares_quadratically() {
        let harness = Harness::new();
        harness.run(&SelectionSorter, &[4, 3, 2, 1, 0]);
        assert_eq!(harness.comparator.meters().comparisons.value(), 4 + 3 + 2 + 1);
    }
}
