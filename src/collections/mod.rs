//! Metered collections built on the storage models
//!
//! Two interchangeable max-priority queues share [`PriorityQueue`]:
//! [`ArrayPriorityQueue`] keeps an implicit 1-based heap in an `ArrayModel`,
//! [`LinkedPriorityQueue`] keeps an explicit complete tree of binary nodes
//! and locates leaves by level arithmetic instead of indices.

mod array_heap;
mod comparator;
mod fifo;
mod linked_heap;
mod stack;

pub use array_heap::ArrayPriorityQueue;
pub use comparator::{Comparator, ComparisonMeters};
pub use fifo::LinkedQueue;
pub use linked_heap::LinkedPriorityQueue;
pub use stack::LinkedStack;

use crate::model::ModelError;

/// Max-priority queue contract.
pub trait PriorityQueue<T> {
    /// Insert `item`.
    fn enqueue(&mut self, item: T) -> Result<(), ModelError>;

    /// Remove and return the greatest item.
    fn dequeue(&mut self) -> Result<T, ModelError>;

    /// Greatest item, left in place.
    fn poll(&self) -> Result<T, ModelError>;

    /// Number of queued items.
    fn size(&self) -> usize;

    /// Whether the queue holds no items.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
