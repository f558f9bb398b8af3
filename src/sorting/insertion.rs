use super::{SortContext, Sorter};
use crate::model::{ArrayModel, ModelError};

/// Sinks each item left past every larger neighbour.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSorter;

impl<T: Clone> Sorter<T> for InsertionSorter {
    fn name(&self) -> &'static str {
        "insertion"
    }

    fn info(&self) -> &'static str {
        "insertion sort, adjacent swaps"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        for pivot in 1..size {
            ctx.checkpoint()?;
            let mut index = pivot;
            while index > 0 && ctx.swap_if_less(target, index, index - 1)? {
                index -= 1;
            }
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
        assert_sorts(&InsertionSorter);
    }

    #[test]
    fn meters_three_items() {
        let harness = Harness::new();
        assert_eq!(harness.run(&InsertionSorter, &[3, 1, 2]), vec![1, 2, 3]);
        // Loading writes 3, then two swaps.
        assert_eq!(harness.target_meters.writes.value(), 3 + 4);
        // Three checks of two reads each, plus the final readback.
        assert_eq!(harness.target_meters.reads.value(), 6 + 3);
        assert_eq!(harness.comparator.meters().comparisons.value(), 3);
        assert_eq!(harness.memory.usage.peak(), 0);
    }
}
