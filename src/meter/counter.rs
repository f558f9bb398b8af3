//! Shared operation counter

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

type IncrementHook = Box<dyn Fn(u64)>;

struct CounterInner {
    value: Cell<u64>,
    hook: Option<IncrementHook>,
}

/// Monotonically increasing operation tally.
///
/// Cloning yields another handle to the same tally, which is how one meter is
/// threaded into every model that must charge it. Handles are `!Send`: a run's
/// meters never leave the thread that owns the run.
#[derive(Clone)]
pub struct Counter {
    inner: Rc<CounterInner>,
}

impl Counter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(CounterInner {
                value: Cell::new(0),
                hook: None,
            }),
        }
    }

    /// Create a counter whose hook observes every incremented value.
    pub fn with_hook(hook: impl Fn(u64) + 'static) -> Self {
        Self {
            inner: Rc::new(CounterInner {
                value: Cell::new(0),
                hook: Some(Box::new(hook)),
            }),
        }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.inner.value.get()
    }

    /// Add one and notify the hook.
    #[inline]
    pub fn increment(&self) {
        let value = self.inner.value.get() + 1;
        self.inner.value.set(value);
        if let Some(hook) = &self.inner.hook {
            hook(value);
        }
    }

    /// Whether both handles refer to the same tally.
    pub fn ptr_eq(&self, other: &Counter) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter")
            .field("value", &self.value())
            .field("hooked", &self.inner.hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_are_shared_between_handles() {
        let counter = Counter::new();
        let alias = counter.clone();
        counter.increment();
        alias.increment();
        assert_eq!(counter.value(), 2);
        assert!(counter.ptr_eq(&alias));
    }

    #[test]
    fn hook_sees_each_value_in_order() {
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let counter = Counter::with_hook(move |value| sink.borrow_mut().push(value));

        for _ in 0..3 {
            counter.increment();
        }

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }
}
