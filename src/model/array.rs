//! Fixed-size metered array

use std::fmt;

use super::{Allocation, ModelError};
use crate::meter::Counter;

/// Read/write meters charged by array models.
#[derive(Debug, Clone, Default)]
pub struct ArrayMeters {
    /// Slot reads.
    pub reads: Counter,
    /// Slot writes (including clears).
    pub writes: Counter,
}

impl ArrayMeters {
    /// Fresh meters at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fixed-capacity slot array; every read and write is metered.
///
/// The size is fixed at construction and never changes. Slots start empty.
pub struct ArrayModel<T> {
    slots: Vec<Option<T>>,
    meters: ArrayMeters,
    allocation: Allocation,
}

impl<T> ArrayModel<T> {
    pub(crate) fn new(size: usize, meters: ArrayMeters, allocation: Allocation) -> Self {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);
        Self {
            slots,
            meters,
            allocation,
        }
    }

    /// Number of slots.
    pub fn size(&self) -> Result<usize, ModelError> {
        self.allocation.ensure_live()?;
        Ok(self.slots.len())
    }

    /// Store `item` at `index`.
    pub fn write(&mut self, index: usize, item: T) -> Result<(), ModelError> {
        let slot = self.slot_mut(index)?;
        *slot = Some(item);
        self.meters.writes.increment();
        Ok(())
    }

    /// Empty the slot at `index`; charged as a write.
    pub fn clear(&mut self, index: usize) -> Result<(), ModelError> {
        let slot = self.slot_mut(index)?;
        *slot = None;
        self.meters.writes.increment();
        Ok(())
    }

    /// Release the array. Returns `true` only for the call that performed the release.
    pub fn destruct(&self) -> Result<bool, ModelError> {
        self.allocation.release()
    }

    /// Whether the array has been released.
    pub fn is_destructed(&self) -> bool {
        self.allocation.is_destructed()
    }

    /// Allocation weight charged for this array (its length).
    pub fn weight(&self) -> u64 {
        self.allocation.weight()
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<T>, ModelError> {
        self.allocation.ensure_live()?;
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange { index, len })
    }
}

impl<T: Clone> ArrayModel<T> {
    /// Item at `index`.
    pub fn read(&self, index: usize) -> Result<T, ModelError> {
        self.allocation.ensure_live()?;
        let len = self.slots.len();
        let item = self
            .slots
            .get(index)
            .ok_or(ModelError::IndexOutOfRange { index, len })?
            .clone()
            .ok_or(ModelError::UninitializedSlot { index })?;
        self.meters.reads.increment();
        Ok(item)
    }

    /// Metered front-to-back iteration; each yielded item costs one read.
    pub fn iter(&self) -> ArrayIter<'_, T> {
        ArrayIter {
            array: self,
            next: 0,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unmetered: formatting is not part of any algorithm.
        f.debug_struct("ArrayModel")
            .field("slots", &self.slots)
            .field("destructed", &self.is_destructed())
            .finish()
    }
}

/// Metered iterator over an [`ArrayModel`].
#[derive(Debug)]
pub struct ArrayIter<'a, T> {
    array: &'a ArrayModel<T>,
    next: usize,
}

impl<T: Clone> Iterator for ArrayIter<'_, T> {
    type Item = Result<T, ModelError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.array.is_destructed() {
            // Report once, then stop.
            if self.next == usize::MAX {
                return None;
            }
            self.next = usize::MAX;
            return Some(Err(ModelError::DestructedAccess));
        }
        if self.next >= self.array.slots.len() {
            return None;
        }
        let item = self.array.read(self.next);
        self.next += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::Registry;

    fn array(size: usize) -> (ArrayModel<i32>, ArrayMeters, Registry) {
        let meters = ArrayMeters::new();
        let usage = Registry::new(0);
        usage.register(size as i64).unwrap();
        let allocation = Allocation::new(usage.clone(), size as u64);
        (ArrayModel::new(size, meters.clone(), allocation), meters, usage)
    }

    #[test]
    fn reads_and_writes_are_metered() {
        let (mut array, meters, _) = array(3);
        array.write(0, 7).unwrap();
        array.write(2, 9).unwrap();
        assert_eq!(array.read(0), Ok(7));
        assert_eq!(array.read(2), Ok(9));
        assert_eq!(array.read(2), Ok(9));

        assert_eq!(meters.writes.value(), 2);
        assert_eq!(meters.reads.value(), 3);
        assert_eq!(array.size(), Ok(3));
    }

    #[test]
    fn out_of_range_and_empty_slots_fail_without_metering() {
        let (mut array, meters, _) = array(2);
        assert_eq!(
            array.write(2, 1),
            Err(ModelError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            array.read(5),
            Err(ModelError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(array.read(1), Err(ModelError::UninitializedSlot { index: 1 }));
        assert_eq!(meters.reads.value(), 0);
        assert_eq!(meters.writes.value(), 0);
    }

    #[test]
    fn destructed_array_rejects_every_accessor() {
        let (mut array, _, usage) = array(4);
        array.write(0, 1).unwrap();

        assert_eq!(array.destruct(), Ok(true));
        assert_eq!(array.destruct(), Ok(false));
        assert_eq!(usage.total(), 0);

        assert_eq!(array.size(), Err(ModelError::DestructedAccess));
        assert_eq!(array.read(0), Err(ModelError::DestructedAccess));
        assert_eq!(array.write(0, 2), Err(ModelError::DestructedAccess));
        assert_eq!(array.clear(0), Err(ModelError::DestructedAccess));
        let mut iter = array.iter();
        assert_eq!(iter.next(), Some(Err(ModelError::DestructedAccess)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iteration_charges_one_read_per_item() {
        let (mut array, meters, _) = array(3);
        for (index, item) in [3, 1, 2].into_iter().enumerate() {
            array.write(index, item).unwrap();
        }
        let items: Result<Vec<_>, _> = array.iter().collect();
        assert_eq!(items, Ok(vec![3, 1, 2]));
        assert_eq!(meters.reads.value(), 3);
    }
}
