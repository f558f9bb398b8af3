//! Running statistics with an injected limit policy
//!
//! Running bounds track the *total* (seeded at `basis`); value bounds track
//! individual registered deltas. Recursion depth and outstanding memory are
//! both modelled as `+n`/`-n` registrations, so `running_max - basis` is the
//! peak of the tracked quantity.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{MeterError, Resource};

/// State of a registry immediately after a registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistrySnapshot {
    /// Delta that was just registered.
    pub delta: i64,
    /// Number of registrations so far (at least one).
    pub count: u64,
    /// Running total, including the basis.
    pub total: i64,
    /// Basis the running total started from.
    pub basis: i64,
    /// Highest running total observed.
    pub running_max: i64,
    /// Lowest running total observed.
    pub running_min: i64,
    /// Largest single delta.
    pub max_value: i64,
    /// Smallest single delta.
    pub min_value: i64,
}

impl RegistrySnapshot {
    /// Mean registered delta.
    pub fn average(&self) -> f64 {
        (self.total - self.basis) as f64 / self.count as f64
    }
}

/// Policy consulted after every registration.
pub trait RegistryPolicy {
    /// Inspect the post-registration state; an error interrupts the caller.
    fn on_register(&self, snapshot: &RegistrySnapshot) -> Result<(), MeterError>;
}

/// Policy that never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbounded;

impl RegistryPolicy for Unbounded {
    fn on_register(&self, _snapshot: &RegistrySnapshot) -> Result<(), MeterError> {
        Ok(())
    }
}

/// Fails a positive registration once the running maximum rises more than
/// `limit` above the basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxTotalLimit {
    resource: Resource,
    limit: u64,
}

impl MaxTotalLimit {
    /// Bound `resource` to `limit` units above the basis.
    pub fn new(resource: Resource, limit: u64) -> Self {
        Self { resource, limit }
    }

    /// Resource being bounded.
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Configured ceiling.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl RegistryPolicy for MaxTotalLimit {
    fn on_register(&self, snapshot: &RegistrySnapshot) -> Result<(), MeterError> {
        // Releases never breach.
        if snapshot.delta <= 0 {
            return Ok(());
        }
        let peak = snapshot.running_max - snapshot.basis;
        if peak > 0 && peak as u64 > self.limit {
            return Err(MeterError::LimitExceeded {
                resource: self.resource,
                limit: self.limit,
            });
        }
        Ok(())
    }
}

impl<F> RegistryPolicy for F
where
    F: Fn(&RegistrySnapshot) -> Result<(), MeterError>,
{
    fn on_register(&self, snapshot: &RegistrySnapshot) -> Result<(), MeterError> {
        self(snapshot)
    }
}

#[derive(Debug)]
struct RegistryState {
    count: u64,
    total: i64,
    running_max: i64,
    running_min: i64,
    max_value: Option<i64>,
    min_value: Option<i64>,
}

struct RegistryInner {
    basis: i64,
    state: RefCell<RegistryState>,
    policy: Box<dyn RegistryPolicy>,
}

/// Running aggregate of registered deltas, shared by handle.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RegistryInner>,
}

impl Registry {
    /// Create an unbounded registry seeded at `basis`.
    pub fn new(basis: i64) -> Self {
        Self::with_policy(basis, Unbounded)
    }

    /// Create a registry whose registrations are checked by `policy`.
    pub fn with_policy(basis: i64, policy: impl RegistryPolicy + 'static) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                basis,
                state: RefCell::new(RegistryState {
                    count: 0,
                    total: basis,
                    running_max: basis,
                    running_min: basis,
                    max_value: None,
                    min_value: None,
                }),
                policy: Box::new(policy),
            }),
        }
    }

    /// Register `delta` and consult the policy.
    ///
    /// The registration is recorded before the policy runs, so a failing
    /// policy leaves the registry consistent.
    pub fn register(&self, delta: i64) -> Result<(), MeterError> {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            state.count += 1;
            state.total += delta;
            state.running_max = state.running_max.max(state.total);
            state.running_min = state.running_min.min(state.total);
            let max_value = state.max_value.map_or(delta, |max| max.max(delta));
            let min_value = state.min_value.map_or(delta, |min| min.min(delta));
            state.max_value = Some(max_value);
            state.min_value = Some(min_value);

            RegistrySnapshot {
                delta,
                count: state.count,
                total: state.total,
                basis: self.inner.basis,
                running_max: state.running_max,
                running_min: state.running_min,
                max_value,
                min_value,
            }
        };
        self.inner.policy.on_register(&snapshot)
    }

    /// Basis the running total started from.
    pub fn basis(&self) -> i64 {
        self.inner.basis
    }

    /// Number of registrations.
    pub fn count(&self) -> u64 {
        self.inner.state.borrow().count
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Running total, including the basis.
    pub fn total(&self) -> i64 {
        self.inner.state.borrow().total
    }

    /// Highest running total observed.
    pub fn running_max(&self) -> i64 {
        self.inner.state.borrow().running_max
    }

    /// Lowest running total observed.
    pub fn running_min(&self) -> i64 {
        self.inner.state.borrow().running_min
    }

    /// Highest running total above the basis, clamped at zero.
    pub fn peak(&self) -> u64 {
        (self.running_max() - self.basis()).max(0) as u64
    }

    /// Mean registered delta.
    pub fn average(&self) -> Result<f64, MeterError> {
        let state = self.inner.state.borrow();
        if state.count == 0 {
            return Err(MeterError::EmptyRegistry);
        }
        Ok((state.total - self.inner.basis) as f64 / state.count as f64)
    }

    /// Largest single delta.
    pub fn max_value(&self) -> Result<i64, MeterError> {
        self.inner
            .state
            .borrow()
            .max_value
            .ok_or(MeterError::EmptyRegistry)
    }

    /// Smallest single delta.
    pub fn min_value(&self) -> Result<i64, MeterError> {
        self.inner
            .state
            .borrow()
            .min_value
            .ok_or(MeterError::EmptyRegistry)
    }

    /// Snapshot of the current state, or `EmptyRegistry` before the first registration.
    pub fn snapshot(&self) -> Result<RegistrySnapshot, MeterError> {
        let state = self.inner.state.borrow();
        match (state.max_value, state.min_value) {
            (Some(max_value), Some(min_value)) => Ok(RegistrySnapshot {
                delta: 0,
                count: state.count,
                total: state.total,
                basis: self.inner.basis,
                running_max: state.running_max,
                running_min: state.running_min,
                max_value,
                min_value,
            }),
            _ => Err(MeterError::EmptyRegistry),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("basis", &self.inner.basis)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}
