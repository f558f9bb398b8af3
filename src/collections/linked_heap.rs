//! Node-backed binary heap
//!
//! The heap is a complete binary tree of [`BinaryNodeModel`]s. With no index
//! to divide, the node at a 1-based position is found from the level
//! structure: level `L` holds up to `2^L` nodes, so a position's level and its
//! offset within that level determine the left/right turns from the root.
//! `sink` and `surface` move items between nodes and never relink them, so
//! positions stay stable while order is repaired.

use super::{Comparator, LinkedQueue, PriorityQueue};
use crate::model::{BinaryNodeModel, ModelError, NodeModelFactory};

/// Max-priority queue over a linked complete binary tree.
#[derive(Debug)]
pub struct LinkedPriorityQueue<T> {
    comparator: Comparator<T>,
    factory: NodeModelFactory,
    size: usize,
    root: Option<BinaryNodeModel<T>>,
}

impl<T: Clone> LinkedPriorityQueue<T> {
    /// Empty queue allocating nodes from `factory`.
    pub fn new(comparator: Comparator<T>, factory: NodeModelFactory) -> Self {
        Self {
            comparator,
            factory,
            size: 0,
            root: None,
        }
    }

    /// Root node, if the queue is not empty.
    pub fn root(&self) -> Option<&BinaryNodeModel<T>> {
        self.root.as_ref()
    }

    /// Parent of the node at 1-based `position` in the complete tree.
    ///
    /// Returns `None` for the root position (and for position 0). The
    /// position may be one past the current size, which names the slot the
    /// next inserted leaf will occupy.
    pub fn leaf_parent(&self, position: usize) -> Result<Option<BinaryNodeModel<T>>, ModelError> {
        if position < 2 {
            return Ok(None);
        }
        if position > self.size + 1 {
            return Err(ModelError::BrokenStructure { size: self.size });
        }
        let mut node = self
            .root
            .clone()
            .ok_or(ModelError::BrokenStructure { size: self.size })?;

        // Levels 0..level together hold `preceding` nodes; `position` lies on `level`.
        let mut preceding = 0usize;
        let mut level = 0u32;
        let mut level_capacity = 1usize;
        while preceding + level_capacity < position {
            preceding += level_capacity;
            level_capacity *= 2;
            level += 1;
        }

        let mut on_level = position - preceding;
        while level > 1 {
            level_capacity /= 2;
            let next = if on_level > level_capacity {
                on_level -= level_capacity;
                node.right()?
            } else {
                node.left()?
            };
            node = next.ok_or(ModelError::BrokenStructure { size: self.size })?;
            level -= 1;
        }
        Ok(Some(node))
    }

    /// Items in breadth-first order (position 1, 2, 3, ...).
    ///
    /// Walks the tree through a metered [`LinkedQueue`] allocated from the
    /// same factory.
    pub fn level_order(&self) -> Result<Vec<T>, ModelError> {
        let mut items = Vec::with_capacity(self.size);
        let mut pending = LinkedQueue::new(self.factory.clone());
        if let Some(root) = &self.root {
            pending.enqueue(root.clone())?;
        }
        while !pending.is_empty() {
            let node = pending.dequeue()?;
            items.push(node.item()?);
            if let Some(left) = node.left()? {
                pending.enqueue(left)?;
            }
            if let Some(right) = node.right()? {
                pending.enqueue(right)?;
            }
        }
        Ok(items)
    }

    /// Destruct every node and forget every queued item.
    pub fn release(&mut self) -> Result<(), ModelError> {
        let mut pending: Vec<BinaryNodeModel<T>> = self.root.take().into_iter().collect();
        while let Some(node) = pending.pop() {
            pending.extend(node.left()?);
            pending.extend(node.right()?);
            node.destruct()?;
        }
        self.size = 0;
        Ok(())
    }

    fn attach_leaf(&self, item: T) -> Result<BinaryNodeModel<T>, ModelError> {
        let parent = self
            .leaf_parent(self.size + 1)?
            .ok_or(ModelError::BrokenStructure { size: self.size })?;
        let leaf = self.factory.create_binary_node(item)?;
        if parent.left()?.is_none() {
            parent.set_left(Some(&leaf))?;
        } else {
            parent.set_right(Some(&leaf))?;
        }
        leaf.set_parent(Some(&parent))?;
        Ok(leaf)
    }

    fn detach_last_leaf(&self) -> Result<T, ModelError> {
        let parent = self
            .leaf_parent(self.size)?
            .ok_or(ModelError::BrokenStructure { size: self.size })?;
        let leaf = match parent.right()? {
            Some(right) => {
                parent.set_right(None)?;
                right
            }
            None => {
                let left = parent
                    .left()?
                    .ok_or(ModelError::BrokenStructure { size: self.size })?;
                parent.set_left(None)?;
                left
            }
        };
        leaf.set_parent(None)?;
        let item = leaf.item()?;
        leaf.destruct()?;
        Ok(item)
    }

    fn surface(&self, mut node: BinaryNodeModel<T>) -> Result<(), ModelError> {
        while let Some(parent) = node.parent()? {
            let item = node.item()?;
            let parent_item = parent.item()?;
            if !self.comparator.less(&parent_item, &item) {
                break;
            }
            parent.set_item(item)?;
            node.set_item(parent_item)?;
            node = parent;
        }
        Ok(())
    }

    fn sink(&self, mut node: BinaryNodeModel<T>) -> Result<(), ModelError> {
        while let Some(left) = node.left()? {
            let item = node.item()?;
            let left_item = left.item()?;
            // A missing right child never wins.
            let (child, child_item) = match node.right()? {
                Some(right) => {
                    let right_item = right.item()?;
                    if self.comparator.less(&left_item, &right_item) {
                        (right, right_item)
                    } else {
                        (left, left_item)
                    }
                }
                None => (left, left_item),
            };
            if !self.comparator.less(&item, &child_item) {
                break;
            }
            node.set_item(child_item)?;
            child.set_item(item)?;
            node = child;
        }
        Ok(())
    }
}

impl<T: Clone> PriorityQueue<T> for LinkedPriorityQueue<T> {
    fn enqueue(&mut self, item: T) -> Result<(), ModelError> {
        if self.size == 0 {
            self.root = Some(self.factory.create_binary_node(item)?);
            self.size = 1;
            return Ok(());
        }
        let leaf = self.attach_leaf(item)?;
        self.size += 1;
        self.surface(leaf)
    }

    fn dequeue(&mut self) -> Result<T, ModelError> {
        let root = self.root.clone().ok_or(ModelError::EmptyQueue)?;
        let result = root.item()?;
        if self.size == 1 {
            root.destruct()?;
            self.root = None;
        } else {
            let last = self.detach_last_leaf()?;
            root.set_item(last)?;
            self.sink(root)?;
        }
        self.size -= 1;
        Ok(result)
    }

    fn poll(&self) -> Result<T, ModelError> {
        self.root.as_ref().ok_or(ModelError::EmptyQueue)?.item()
    }

    fn size(&self) -> usize {
        self.size
    }
}
