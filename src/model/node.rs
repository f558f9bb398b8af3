//! Metered linked nodes
//!
//! Node handles are shared (`Rc`): cloning a handle yields the same node.
//! Child and `next` links own their targets; a binary node's parent link is a
//! `Weak` back-reference used only for navigation.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Allocation, ModelError};
use crate::meter::Counter;

/// Meters charged by node models.
///
/// Item accesses and link accesses are tallied separately.
#[derive(Debug, Clone, Default)]
pub struct NodeMeters {
    /// Item reads.
    pub reads: Counter,
    /// Item writes.
    pub writes: Counter,
    /// Link reads (`next`, `left`, `right`, `parent`).
    pub link_reads: Counter,
    /// Link writes.
    pub link_writes: Counter,
}

impl NodeMeters {
    /// Fresh meters at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

struct ListNodeInner<T> {
    item: RefCell<T>,
    next: RefCell<Option<ListNodeModel<T>>>,
    meters: NodeMeters,
    allocation: Allocation,
}

/// Singly linked node.
pub struct ListNodeModel<T> {
    inner: Rc<ListNodeInner<T>>,
}

impl<T> Clone for ListNodeModel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> ListNodeModel<T> {
    pub(crate) fn new(item: T, meters: NodeMeters, allocation: Allocation) -> Self {
        Self {
            inner: Rc::new(ListNodeInner {
                item: RefCell::new(item),
                next: RefCell::new(None),
                meters,
                allocation,
            }),
        }
    }

    /// Replace the stored item.
    pub fn set_item(&self, item: T) -> Result<(), ModelError> {
        self.inner.allocation.ensure_live()?;
        *self.inner.item.borrow_mut() = item;
        self.inner.meters.writes.increment();
        Ok(())
    }

    /// Following node, if any.
    pub fn next(&self) -> Result<Option<ListNodeModel<T>>, ModelError> {
        self.inner.allocation.ensure_live()?;
        let next = self.inner.next.borrow().clone();
        self.inner.meters.link_reads.increment();
        Ok(next)
    }

    /// Point this node at `next`.
    pub fn set_next(&self, next: Option<&ListNodeModel<T>>) -> Result<(), ModelError> {
        self.inner.allocation.ensure_live()?;
        *self.inner.next.borrow_mut() = next.cloned();
        self.inner.meters.link_writes.increment();
        Ok(())
    }

    /// Release the node. Returns `true` only for the call that performed the release.
    pub fn destruct(&self) -> Result<bool, ModelError> {
        self.inner.allocation.release()
    }

    /// Whether the node has been released.
    pub fn is_destructed(&self) -> bool {
        self.inner.allocation.is_destructed()
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &ListNodeModel<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Detach and return the `next` link without metering.
    ///
    /// Only for teardown of long chains, which would otherwise be dropped
    /// recursively.
    pub(crate) fn take_next_unmetered(&self) -> Option<ListNodeModel<T>> {
        self.inner.next.borrow_mut().take()
    }
}

impl<T: Clone> ListNodeModel<T> {
    /// Stored item.
    pub fn item(&self) -> Result<T, ModelError> {
        self.inner.allocation.ensure_live()?;
        let item = self.inner.item.borrow().clone();
        self.inner.meters.reads.increment();
        Ok(item)
    }
}

impl<T: fmt::Debug> fmt::Debug for ListNodeModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListNodeModel")
            .field("item", &*self.inner.item.borrow())
            .field("destructed", &self.is_destructed())
            .finish()
    }
}

struct BinaryNodeInner<T> {
    item: RefCell<T>,
    left: RefCell<Option<BinaryNodeModel<T>>>,
    right: RefCell<Option<BinaryNodeModel<T>>>,
    parent: RefCell<Weak<BinaryNodeInner<T>>>,
    meters: NodeMeters,
    allocation: Allocation,
}

/// Binary tree node with a non-owning parent link.
pub struct BinaryNodeModel<T> {
    inner: Rc<BinaryNodeInner<T>>,
}

impl<T> Clone for BinaryNodeModel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> BinaryNodeModel<T> {
    pub(crate) fn new(item: T, meters: NodeMeters, allocation: Allocation) -> Self {
        Self {
            inner: Rc::new(BinaryNodeInner {
                item: RefCell::new(item),
                left: RefCell::new(None),
                right: RefCell::new(None),
                parent: RefCell::new(Weak::new()),
                meters,
                allocation,
            }),
        }
    }

    /// Replace the stored item.
    pub fn set_item(&self, item: T) -> Result<(), ModelError> {
        self.inner.allocation.ensure_live()?;
        *self.inner.item.borrow_mut() = item;
        self.inner.meters.writes.increment();
        Ok(())
    }

    /// Left child, if any.
    pub fn left(&self) -> Result<Option<BinaryNodeModel<T>>, ModelError> {
        self.read_link(&self.inner.left)
    }

    /// Right child, if any.
    pub fn right(&self) -> Result<Option<BinaryNodeModel<T>>, ModelError> {
        self.read_link(&self.inner.right)
    }

    /// Parent, if any and still alive.
    pub fn parent(&self) -> Result<Option<BinaryNodeModel<T>>, ModelError> {
        self.inner.allocation.ensure_live()?;
        let parent = self
            .inner
            .parent
            .borrow()
            .upgrade()
            .map(|inner| BinaryNodeModel { inner });
        self.inner.meters.link_reads.increment();
        Ok(parent)
    }

    /// Attach or detach the left child.
    pub fn set_left(&self, node: Option<&BinaryNodeModel<T>>) -> Result<(), ModelError> {
        self.write_link(&self.inner.left, node)
    }

    /// Attach or detach the right child.
    pub fn set_right(&self, node: Option<&BinaryNodeModel<T>>) -> Result<(), ModelError> {
        self.write_link(&self.inner.right, node)
    }

    /// Set or clear the parent back-reference.
    pub fn set_parent(&self, node: Option<&BinaryNodeModel<T>>) -> Result<(), ModelError> {
        self.inner.allocation.ensure_live()?;
        *self.inner.parent.borrow_mut() = node.map_or_else(Weak::new, |n| Rc::downgrade(&n.inner));
        self.inner.meters.link_writes.increment();
        Ok(())
    }

    /// Release the node. Returns `true` only for the call that performed the release.
    pub fn destruct(&self) -> Result<bool, ModelError> {
        self.inner.allocation.release()
    }

    /// Whether the node has been released.
    pub fn is_destructed(&self) -> bool {
        self.inner.allocation.is_destructed()
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &BinaryNodeModel<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn read_link(
        &self,
        link: &RefCell<Option<BinaryNodeModel<T>>>,
    ) -> Result<Option<BinaryNodeModel<T>>, ModelError> {
        self.inner.allocation.ensure_live()?;
        let node = link.borrow().clone();
        self.inner.meters.link_reads.increment();
        Ok(node)
    }

    fn write_link(
        &self,
        link: &RefCell<Option<BinaryNodeModel<T>>>,
        node: Option<&BinaryNodeModel<T>>,
    ) -> Result<(), ModelError> {
        self.inner.allocation.ensure_live()?;
        *link.borrow_mut() = node.cloned();
        self.inner.meters.link_writes.increment();
        Ok(())
    }
}

impl<T: Clone> BinaryNodeModel<T> {
    /// Stored item.
    pub fn item(&self) -> Result<T, ModelError> {
        self.inner.allocation.ensure_live()?;
        let item = self.inner.item.borrow().clone();
        self.inner.meters.reads.increment();
        Ok(item)
    }
}

impl<T: fmt::Debug> fmt::Debug for BinaryNodeModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryNodeModel")
            .field("item", &*self.inner.item.borrow())
            .field("destructed", &self.is_destructed())
            .finish()
    }
}
