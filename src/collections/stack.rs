//! Linked LIFO stack

use crate::model::{ListNodeModel, ModelError, NodeModelFactory};

/// Stack of list nodes; popped nodes are destructed.
#[derive(Debug)]
pub struct LinkedStack<T> {
    factory: NodeModelFactory,
    size: usize,
    top: Option<ListNodeModel<T>>,
}

impl<T: Clone> LinkedStack<T> {
    /// Empty stack allocating nodes from `factory`.
    pub fn new(factory: NodeModelFactory) -> Self {
        Self {
            factory,
            size: 0,
            top: None,
        }
    }

    /// Put `item` on top.
    pub fn push(&mut self, item: T) -> Result<(), ModelError> {
        let node = self.factory.create_list_node(item)?;
        node.set_next(self.top.as_ref())?;
        self.top = Some(node);
        self.size += 1;
        Ok(())
    }

    /// Remove and return the top item.
    pub fn pop(&mut self) -> Result<T, ModelError> {
        let top = self.top.as_ref().ok_or(ModelError::EmptyStack)?;
        let item = top.item()?;
        let next = top.next()?;
        top.destruct()?;
        self.top = next;
        self.size -= 1;
        Ok(item)
    }

    /// Top item, left in place.
    pub fn peek(&self) -> Result<T, ModelError> {
        self.top.as_ref().ok_or(ModelError::EmptyStack)?.item()
    }

    /// Number of items.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains do not recurse on drop.
        let mut next = self.top.take();
        while let Some(node) = next {
            next = node.take_next_unmetered();
        }
    }
}
