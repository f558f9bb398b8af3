use std::fmt;
use std::time::Duration;

use super::SandboxError;

/// Size of a trial and the limits it runs under. Unset limits are unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortTask {
    /// Number of items in the sample.
    pub items_count: usize,
    /// Peak auxiliary memory weight allowed.
    pub aux_memory_limit: Option<u64>,
    /// Maximum recursion depth allowed.
    pub recursion_limit: Option<u64>,
    /// Wall-clock budget, enforced at sorter checkpoints.
    pub time_limit: Option<Duration>,
}

impl SortTask {
    /// Unbounded task over `items_count` items.
    pub fn new(items_count: usize) -> Self {
        Self {
            items_count,
            aux_memory_limit: None,
            recursion_limit: None,
            time_limit: None,
        }
    }

    /// Cap the peak auxiliary memory weight.
    pub fn with_aux_memory_limit(mut self, limit: u64) -> Self {
        self.aux_memory_limit = Some(limit);
        self
    }

    /// Cap the recursion depth.
    pub fn with_recursion_limit(mut self, limit: u64) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Cap the elapsed time.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Reject tasks that cannot produce a meaningful trial.
    pub fn validate(&self) -> Result<(), SandboxError> {
        if self.items_count == 0 {
            return Err(SandboxError::invalid_task("items count must be > 0"));
        }
        Ok(())
    }
}

impl fmt::Display for SortTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} items", self.items_count)?;
        if let Some(limit) = self.aux_memory_limit {
            write!(f, ", aux memory <= {limit}")?;
        }
        if let Some(limit) = self.recursion_limit {
            write!(f, ", recursion <= {limit}")?;
        }
        if let Some(limit) = self.time_limit {
            write!(f, ", time <= {}ms", limit.as_millis())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_limits() {
        let task = SortTask::new(8)
            .with_aux_memory_limit(10)
            .with_recursion_limit(2)
            .with_time_limit(Duration::from_millis(50));
        assert_eq!(task.aux_memory_limit, Some(10));
        assert_eq!(task.recursion_limit, Some(2));
        assert_eq!(task.time_limit, Some(Duration::from_millis(50)));
        assert_eq!(
            task.to_string(),
            "8 items, aux memory <= 10, recursion <= 2, time <= 50ms"
        );
    }

    #[test]
    fn zero_items_is_rejected() {
        assert!(matches!(
            SortTask::new(0).validate(),
            Err(SandboxError::InvalidTask(_))
        ));
        assert!(SortTask::new(1).validate().is_ok());
    }
}
