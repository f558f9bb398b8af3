//! Linked FIFO queue

use crate::model::{ListNodeModel, ModelError, NodeModelFactory};

/// First-in first-out queue of list nodes; dequeued nodes are destructed.
#[derive(Debug)]
pub struct LinkedQueue<T> {
    factory: NodeModelFactory,
    size: usize,
    oldest: Option<ListNodeModel<T>>,
    newest: Option<ListNodeModel<T>>,
}

impl<T: Clone> LinkedQueue<T> {
    /// Empty queue allocating nodes from `factory`.
    pub fn new(factory: NodeModelFactory) -> Self {
        Self {
            factory,
            size: 0,
            oldest: None,
            newest: None,
        }
    }

    /// Append `item` at the back.
    pub fn enqueue(&mut self, item: T) -> Result<(), ModelError> {
        let node = self.factory.create_list_node(item)?;
        match &self.newest {
            Some(newest) => newest.set_next(Some(&node))?,
            None => self.oldest = Some(node.clone()),
        }
        self.newest = Some(node);
        self.size += 1;
        Ok(())
    }

    /// Remove and return the oldest item.
    pub fn dequeue(&mut self) -> Result<T, ModelError> {
        let oldest = self.oldest.as_ref().ok_or(ModelError::EmptyQueue)?;
        let item = oldest.item()?;
        let next = oldest.next()?;
        oldest.destruct()?;
        self.oldest = next;
        if self.oldest.is_none() {
            self.newest = None;
        }
        self.size -= 1;
        Ok(item)
    }

    /// Oldest item, left in place.
    pub fn peek(&self) -> Result<T, ModelError> {
        self.oldest.as_ref().ok_or(ModelError::EmptyQueue)?.item()
    }

    /// Number of items.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        self.newest = None;
        let mut next = self.oldest.take();
        while let Some(node) = next {
            next = node.take_next_unmetered();
        }
    }
}
