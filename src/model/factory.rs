//! Model factories
//!
//! Factories are the only way to obtain models. Each creation charges the
//! model's weight to `MemoryMeters::usage` (and records it in
//! `allocations`); a breach of the usage policy fails the creation itself
//! and leaves no weight outstanding.

use tracing::trace;

use super::{
    Allocation, ArrayMeters, ArrayModel, BinaryNodeModel, ListNodeModel, ModelError, NodeMeters,
    BINARY_NODE_WEIGHT, LIST_NODE_WEIGHT,
};
use crate::meter::{MaxTotalLimit, Registry, Resource};

/// Registries tracking memory handed out by factories.
#[derive(Debug, Clone)]
pub struct MemoryMeters {
    /// Positive weights only: count, total and largest single allocation.
    pub allocations: Registry,
    /// `+weight` on creation, `-weight` on release; the running maximum is the peak.
    pub usage: Registry,
}

impl MemoryMeters {
    /// Unbounded memory meters.
    pub fn new() -> Self {
        Self {
            allocations: Registry::new(0),
            usage: Registry::new(0),
        }
    }

    /// Memory meters whose outstanding usage may not exceed `limit`.
    pub fn with_limit(limit: Option<u64>) -> Self {
        match limit {
            Some(limit) => Self {
                allocations: Registry::new(0),
                usage: Registry::with_policy(0, MaxTotalLimit::new(Resource::AuxMemory, limit)),
            },
            None => Self::new(),
        }
    }

    /// Outstanding (not yet released) weight.
    pub fn outstanding(&self) -> i64 {
        self.usage.total() - self.usage.basis()
    }

    /// Charge `weight` for a new model. A refused charge is given back to
    /// `usage` at once and never reaches `allocations`.
    fn charge(&self, weight: u64) -> Result<Allocation, ModelError> {
        trace!(weight, "charging model allocation");
        if let Err(error) = self.usage.register(weight as i64) {
            self.usage.register(-(weight as i64))?;
            return Err(error.into());
        }
        self.allocations.register(weight as i64)?;
        Ok(Allocation::new(self.usage.clone(), weight))
    }
}

impl Default for MemoryMeters {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates metered arrays.
#[derive(Debug, Clone, Default)]
pub struct ArrayModelFactory {
    meters: ArrayMeters,
    memory: MemoryMeters,
}

impl ArrayModelFactory {
    /// Factory charging `meters` for accesses and `memory` for allocations.
    pub fn new(meters: ArrayMeters, memory: MemoryMeters) -> Self {
        Self { meters, memory }
    }

    /// Allocate an array of `size` empty slots.
    pub fn create<T>(&self, size: usize) -> Result<ArrayModel<T>, ModelError> {
        let allocation = self.memory.charge(size as u64)?;
        Ok(ArrayModel::new(size, self.meters.clone(), allocation))
    }

    /// Access meters shared by every array from this factory.
    pub fn meters(&self) -> &ArrayMeters {
        &self.meters
    }

    /// Memory meters charged by this factory.
    pub fn memory(&self) -> &MemoryMeters {
        &self.memory
    }
}

/// Creates metered list and binary nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeModelFactory {
    meters: NodeMeters,
    memory: MemoryMeters,
}

impl NodeModelFactory {
    /// Factory charging `meters` for accesses and `memory` for allocations.
    pub fn new(meters: NodeMeters, memory: MemoryMeters) -> Self {
        Self { meters, memory }
    }

    /// Allocate a list node holding `item`.
    pub fn create_list_node<T>(&self, item: T) -> Result<ListNodeModel<T>, ModelError> {
        let allocation = self.memory.charge(LIST_NODE_WEIGHT)?;
        Ok(ListNodeModel::new(item, self.meters.clone(), allocation))
    }

    /// Allocate a binary node holding `item`.
    pub fn create_binary_node<T>(&self, item: T) -> Result<BinaryNodeModel<T>, ModelError> {
        let allocation = self.memory.charge(BINARY_NODE_WEIGHT)?;
        Ok(BinaryNodeModel::new(item, self.meters.clone(), allocation))
    }

    /// Access meters shared by every node from this factory.
    pub fn meters(&self) -> &NodeMeters {
        &self.meters
    }

    /// Memory meters charged by this factory.
    pub fn memory(&self) -> &MemoryMeters {
        &self.memory
    }
}
