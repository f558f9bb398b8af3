//! Array-backed binary heap
//!
//! Slot 0 is unused; the children of slot `i` are `2i` and `2i + 1`, its
//! parent is `i / 2`. A full backing array is replaced by one of twice the
//! capacity and the old one is destructed.

use tracing::debug;

use super::{Comparator, PriorityQueue};
use crate::model::{ArrayModel, ArrayModelFactory, ModelError};

const INITIAL_CAPACITY: usize = 16;

/// Max-priority queue over an implicit heap in an [`ArrayModel`].
#[derive(Debug)]
pub struct ArrayPriorityQueue<T> {
    comparator: Comparator<T>,
    factory: ArrayModelFactory,
    initial_capacity: usize,
    size: usize,
    items: Option<ArrayModel<T>>,
}

impl<T: Clone> ArrayPriorityQueue<T> {
    /// Empty queue; storage is allocated on the first `enqueue`.
    pub fn new(comparator: Comparator<T>, factory: ArrayModelFactory) -> Self {
        Self::with_capacity(INITIAL_CAPACITY, comparator, factory)
    }

    /// Empty queue whose first allocation holds `capacity` items.
    pub fn with_capacity(
        capacity: usize,
        comparator: Comparator<T>,
        factory: ArrayModelFactory,
    ) -> Self {
        Self {
            comparator,
            factory,
            initial_capacity: capacity.max(1),
            size: 0,
            items: None,
        }
    }

    /// Items the current backing array can hold without growing.
    pub fn capacity(&self) -> usize {
        self.items
            .as_ref()
            .and_then(|items| items.size().ok())
            .map_or(0, |slots| slots - 1)
    }

    /// Destruct the backing array and forget every queued item.
    pub fn release(&mut self) -> Result<(), ModelError> {
        if let Some(items) = self.items.take() {
            items.destruct()?;
        }
        self.size = 0;
        Ok(())
    }

    /// Make room for `required` items. On failure the queue is left unchanged.
    fn reserve(&mut self, required: usize) -> Result<(), ModelError> {
        let capacity = self.capacity();
        if self.items.is_none() {
            self.items = Some(self.factory.create(self.initial_capacity + 1)?);
            return Ok(());
        }
        if required <= capacity {
            return Ok(());
        }
        let old = self
            .items
            .as_ref()
            .ok_or(ModelError::BrokenStructure { size: self.size })?;
        let grown = capacity * 2;
        debug!(from = capacity, to = grown, "growing heap storage");
        let mut items = self.factory.create(grown + 1)?;
        for index in 1..=self.size {
            items.write(index, old.read(index)?)?;
        }
        old.destruct()?;
        self.items = Some(items);
        Ok(())
    }

    fn surface(
        items: &mut ArrayModel<T>,
        comparator: &Comparator<T>,
        mut index: usize,
    ) -> Result<(), ModelError> {
        while index > 1 {
            let parent = index / 2;
            let item = items.read(index)?;
            let parent_item = items.read(parent)?;
            if !comparator.less(&parent_item, &item) {
                break;
            }
            items.write(parent, item)?;
            items.write(index, parent_item)?;
            index = parent;
        }
        Ok(())
    }

    fn sink(
        items: &mut ArrayModel<T>,
        comparator: &Comparator<T>,
        size: usize,
        mut index: usize,
    ) -> Result<(), ModelError> {
        while index * 2 <= size {
            let mut child = index * 2;
            let item = items.read(index)?;
            let mut child_item = items.read(child)?;
            if child < size {
                let right_item = items.read(child + 1)?;
                if comparator.less(&child_item, &right_item) {
                    child_item = right_item;
                    child += 1;
                }
            }
            if !comparator.less(&item, &child_item) {
                break;
            }
            items.write(index, child_item)?;
            items.write(child, item)?;
            index = child;
        }
        Ok(())
    }
}

impl<T: Clone> PriorityQueue<T> for ArrayPriorityQueue<T> {
    fn enqueue(&mut self, item: T) -> Result<(), ModelError> {
        let position = self.size + 1;
        self.reserve(position)?;
        let items = self
            .items
            .as_mut()
            .ok_or(ModelError::BrokenStructure { size: self.size })?;
        items.write(position, item)?;
        Self::surface(items, &self.comparator, position)?;
        self.size = position;
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T, ModelError> {
        if self.size == 0 {
            return Err(ModelError::EmptyQueue);
        }
        let size = self.size;
        let items = self
            .items
            .as_mut()
            .ok_or(ModelError::BrokenStructure { size })?;

        let result = items.read(1)?;
        if size > 1 {
            let last = items.read(size)?;
            items.write(1, last)?;
        }
        items.clear(size)?;
        self.size = size - 1;
        Self::sink(items, &self.comparator, self.size, 1)?;
        Ok(result)
    }

    fn poll(&self) -> Result<T, ModelError> {
        match (&self.items, self.size) {
            (Some(items), size) if size > 0 => items.read(1),
            _ => Err(ModelError::EmptyQueue),
        }
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::ComparisonMeters;
    use crate::model::{ArrayMeters, MemoryMeters};

    fn queue() -> (ArrayPriorityQueue<i32>, MemoryMeters) {
        let memory = MemoryMeters::new();
        let factory = ArrayModelFactory::new(ArrayMeters::new(), memory.clone());
        let comparator = Comparator::natural(ComparisonMeters::new());
        (ArrayPriorityQueue::new(comparator, factory), memory)
    }

    #[test]
    fn dequeues_in_descending_order() {
        let (mut queue, _) = queue();
        for item in [5, 1, 9, 3, 7, 9, 0] {
            queue.enqueue(item).unwrap();
        }
        assert_eq!(queue.poll(), Ok(9));

        let mut drained = Vec::new();
        while !queue.is_empty() {
            drained.push(queue.dequeue().unwrap());
        }
        assert_eq!(drained, vec![9, 9, 7, 5, 3, 1, 0]);
    }

    #[test]
    fn empty_queue_fails() {
        let (mut queue, _) = queue();
        assert_eq!(queue.poll(), Err(ModelError::EmptyQueue));
        assert_eq!(queue.dequeue(), Err(ModelError::EmptyQueue));
        queue.enqueue(1).unwrap();
        queue.dequeue().unwrap();
        assert_eq!(queue.dequeue(), Err(ModelError::EmptyQueue));
    }

    #[test]
    fn growth_doubles_and_releases_old_storage() {
        let (mut queue, memory) = queue();
        for item in 0..17 {
            queue.enqueue(item).unwrap();
        }
        assert_eq!(queue.capacity(), 32);
        // 17 slots released, 33 outstanding.
        assert_eq!(memory.outstanding(), 33);
        assert_eq!(memory.usage.peak(), 17 + 33);
        assert_eq!(queue.dequeue(), Ok(16));
    }

    #[test]
    fn release_returns_storage() {
        let (mut queue, memory) = queue();
        queue.enqueue(3).unwrap();
        queue.release().unwrap();
        assert_eq!(memory.outstanding(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 0);
    }

    #[test]
    fn failed_growth_keeps_queued_items() {
        let memory = MemoryMeters::with_limit(Some(10));
        let factory = ArrayModelFactory::new(ArrayMeters::new(), memory.clone());
        let comparator = Comparator::natural(ComparisonMeters::new());
        let mut queue = ArrayPriorityQueue::with_capacity(4, comparator, factory);
        for item in 0..4 {
            queue.enqueue(item).unwrap();
        }

        let error = queue.enqueue(9).unwrap_err();
        assert!(error.is_limit_breach());
        assert_eq!(queue.size(), 4);
        assert_eq!(queue.capacity(), 4);
        assert_eq!(queue.poll(), Ok(3));
        assert_eq!(memory.outstanding(), 5);
        assert_eq!(queue.dequeue(), Ok(3));
    }
}
