//! Metering primitives
//!
//! Append-only operation tallies and running statistics. These carry no
//! policy of their own: limits are injected as policy objects and checked
//! inline, so a breach interrupts the caller on the very operation that
//! crossed the ceiling.

mod counter;
mod registry;
mod stopwatch;

pub use counter::Counter;
pub use registry::{MaxTotalLimit, Registry, RegistryPolicy, RegistrySnapshot, Unbounded};
pub use stopwatch::{Stopwatch, StopwatchPolicy, TimeLimit};

use std::fmt;

use thiserror::Error;

/// Resources that can be bounded during a sandboxed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Resource {
    /// Auxiliary memory held by models created during the run.
    AuxMemory,
    /// Depth of registered recursive calls.
    Recursion,
    /// Wall-clock time in milliseconds.
    Time,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::AuxMemory => write!(f, "auxiliary memory"),
            Resource::Recursion => write!(f, "recursion depth"),
            Resource::Time => write!(f, "time"),
        }
    }
}

/// Errors raised by meters and their limit policies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeterError {
    /// Statistic requested from a registry with no registered values.
    #[error("registry is empty")]
    EmptyRegistry,

    /// A configured resource ceiling was crossed.
    #[error("{resource} limit exceeded (limit {limit})")]
    LimitExceeded {
        /// Resource whose limit was crossed.
        resource: Resource,
        /// Configured limit.
        limit: u64,
    },
}

/// Register entry into a recursive call (`+1` on the recursion registry).
pub fn register_recursive_call(recursions: &Registry) -> Result<(), MeterError> {
    recursions.register(1)
}

/// Register return from a recursive call (`-1` on the recursion registry).
pub fn register_recursive_return(recursions: &Registry) -> Result<(), MeterError> {
    recursions.register(-1)
}
