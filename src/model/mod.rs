//! Metered storage models
//!
//! Every accessor charges exactly one meter per logical operation and fails
//! with [`ModelError::DestructedAccess`] once the model has been released.
//! Models are only created through a factory, which charges their allocation
//! weight to a [`MemoryMeters`] pair; the first successful `destruct` gives
//! the weight back.

mod array;
mod factory;
mod node;

pub use array::{ArrayIter, ArrayMeters, ArrayModel};
pub use factory::{ArrayModelFactory, MemoryMeters, NodeModelFactory};
pub use node::{BinaryNodeModel, ListNodeModel, NodeMeters};

use std::cell::Cell;

use thiserror::Error;
use tracing::trace;

use crate::meter::{MeterError, Registry};

/// Allocation weight of a list node (item + next link).
pub const LIST_NODE_WEIGHT: u64 = 2;

/// Allocation weight of a binary node (item + left, right, parent links).
pub const BINARY_NODE_WEIGHT: u64 = 4;

/// Errors raised by storage models and the collections built on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Accessor called on a model that was already destructed.
    #[error("model is destructed")]
    DestructedAccess,

    /// Array index outside `0..len`.
    #[error("index {index} out of range for array of size {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Array size.
        len: usize,
    },

    /// Read of an array slot that was never written (or was cleared).
    #[error("array slot {index} holds no item")]
    UninitializedSlot {
        /// Slot index.
        index: usize,
    },

    /// Removal or peek on an empty queue.
    #[error("queue is empty")]
    EmptyQueue,

    /// Removal or peek on an empty stack.
    #[error("stack is empty")]
    EmptyStack,

    /// A linked structure is missing a node its size says must exist.
    #[error("linked structure is inconsistent with its size ({size})")]
    BrokenStructure {
        /// Recorded size of the structure.
        size: usize,
    },

    /// Meter or limit failure raised while operating on a model.
    #[error(transparent)]
    Meter(#[from] MeterError),
}

impl ModelError {
    /// Whether this is a configured resource limit being crossed.
    pub fn is_limit_breach(&self) -> bool {
        matches!(self, ModelError::Meter(MeterError::LimitExceeded { .. }))
    }
}

/// One-shot release flag tied to the registry that charged the allocation.
pub(crate) struct Allocation {
    usage: Registry,
    weight: u64,
    destructed: Cell<bool>,
}

impl Allocation {
    pub(crate) fn new(usage: Registry, weight: u64) -> Self {
        Self {
            usage,
            weight,
            destructed: Cell::new(false),
        }
    }

    #[inline]
    pub(crate) fn ensure_live(&self) -> Result<(), ModelError> {
        if self.destructed.get() {
            return Err(ModelError::DestructedAccess);
        }
        Ok(())
    }

    pub(crate) fn is_destructed(&self) -> bool {
        self.destructed.get()
    }

    pub(crate) fn weight(&self) -> u64 {
        self.weight
    }

    /// Flip the flag; only the transitioning call gives the weight back.
    pub(crate) fn release(&self) -> Result<bool, ModelError> {
        if self.destructed.replace(true) {
            return Ok(false);
        }
        trace!(weight = self.weight, "releasing model allocation");
        self.usage.register(-(self.weight as i64))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::Resource;

    #[test]
    fn release_is_one_shot() {
        let usage = Registry::new(0);
        usage.register(4).unwrap();
        let allocation = Allocation::new(usage.clone(), 4);

        assert_eq!(allocation.release(), Ok(true));
        assert_eq!(allocation.release(), Ok(false));
        assert_eq!(usage.total(), 0);
        assert_eq!(usage.count(), 2);
        assert_eq!(allocation.ensure_live(), Err(ModelError::DestructedAccess));
    }

    #[test]
    fn limit_breach_is_recognised() {
        let breach = ModelError::from(MeterError::LimitExceeded {
            resource: Resource::AuxMemory,
            limit: 1,
        });
        assert!(breach.is_limit_breach());
        assert!(!ModelError::EmptyQueue.is_limit_breach());
        assert!(!ModelError::Meter(MeterError::EmptyRegistry).is_limit_breach());
    }
}
