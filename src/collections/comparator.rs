//! Metered item ordering

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::meter::Counter;

/// Meters charged by a [`Comparator`].
#[derive(Debug, Clone, Default)]
pub struct ComparisonMeters {
    /// Ordering comparisons.
    pub comparisons: Counter,
    /// Equality tests.
    pub equality_tests: Counter,
    /// Hash computations.
    pub hashings: Counter,
}

impl ComparisonMeters {
    /// Fresh meters at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Item ordering that charges a meter for every comparison.
pub struct Comparator<T> {
    order: Rc<dyn Fn(&T, &T) -> Ordering>,
    meters: ComparisonMeters,
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            order: Rc::clone(&self.order),
            meters: self.meters.clone(),
        }
    }
}

impl<T: Ord + 'static> Comparator<T> {
    /// Natural ordering of `T`.
    pub fn natural(meters: ComparisonMeters) -> Self {
        Self {
            order: Rc::new(|a: &T, b: &T| a.cmp(b)),
            meters,
        }
    }
}

impl<T> Comparator<T> {
    /// Ordering supplied by `order`.
    pub fn by(meters: ComparisonMeters, order: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        Self {
            order: Rc::new(order),
            meters,
        }
    }

    /// Compare `first` to `second`.
    #[inline]
    pub fn compare(&self, first: &T, second: &T) -> Ordering {
        self.meters.comparisons.increment();
        (self.order)(first, second)
    }

    /// `first < second`.
    #[inline]
    pub fn less(&self, first: &T, second: &T) -> bool {
        self.compare(first, second) == Ordering::Less
    }

    /// `first > second`.
    #[inline]
    pub fn greater(&self, first: &T, second: &T) -> bool {
        self.compare(first, second) == Ordering::Greater
    }

    /// Equality under this ordering, charged as an equality test.
    pub fn equal(&self, first: &T, second: &T) -> bool {
        self.meters.equality_tests.increment();
        (self.order)(first, second) == Ordering::Equal
    }

    /// Meters charged by this comparator.
    pub fn meters(&self) -> &ComparisonMeters {
        &self.meters
    }
}

impl<T: Hash> Comparator<T> {
    /// Hash `item`, charged as a hashing.
    pub fn hash(&self, item: &T) -> u64 {
        self.meters.hashings.increment();
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        hasher.finish()
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("meters", &self.meters)
            .finish_non_exhaustive()
    }
}
