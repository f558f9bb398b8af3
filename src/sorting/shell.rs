use super::{SortContext, Sorter};
use crate::model::{ArrayModel, ModelError};

/// Gap schedule for [`ShellSorter`].
pub trait GapSequence {
    /// Gaps for `size` items, largest first, always ending in 1.
    fn gaps(&self, size: usize) -> Vec<usize>;
}

/// Knuth's `(3^k - 1) / 2` sequence capped at a third of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnuthGaps;

impl GapSequence for KnuthGaps {
    fn gaps(&self, size: usize) -> Vec<usize> {
        let mut gaps = vec![1];
        let mut gap = 4;
        while gap <= size / 3 {
            gaps.push(gap);
            gap = 3 * gap + 1;
        }
        gaps.reverse();
        gaps
    }
}

/// Insertion sort over a shrinking sequence of strides.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSorter<G> {
    gaps: G,
}

impl<G: GapSequence> ShellSorter<G> {
    /// Sorter using `gaps` as its stride schedule.
    pub fn new(gaps: G) -> Self {
        Self { gaps }
    }
}

impl<T: Clone, G: GapSequence> Sorter<T> for ShellSorter<G> {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn info(&self) -> &'static str {
        "shell sort over Knuth gaps"
    }

    fn sort(&self, target: &mut ArrayModel<T>, ctx: &SortContext<'_, T>) -> Result<(), ModelError> {
        let size = target.size()?;
        if size < 2 {
            return Ok(());
        }
        for gap in self.gaps.gaps(size) {
            ctx.checkpoint()?;
            for pivot in gap..size {
                let mut index = pivot;
                while index >= gap && ctx.swap_if_less(target, index, index - gap)? {
                    index -= gap;
                }
            }
        }
        Ok(())
    }
}
