use std::time::Duration;

use super::request::BatchClass;

/// Default bound on distinct pending keys per class.
pub const DEFAULT_MAX_PENDING: usize = 10_000;

/// Shortest flush period a timer will run with.
pub const MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(1);

/// Flush cadence and queue bound for each request class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub add_interval: Duration,
    pub get_interval: Duration,
    pub update_interval: Duration,
    /// `None` leaves the pending tables unbounded.
    pub max_pending: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            add_interval: Duration::from_secs(10),
            get_interval: Duration::from_secs(1),
            update_interval: Duration::from_secs(1),
            max_pending: Some(DEFAULT_MAX_PENDING),
        }
    }
}

impl BatchConfig {
    /// Same period for every class.
    #[must_use]
    pub fn uniform(interval: Duration) -> Self {
        Self {
            add_interval: interval,
            get_interval: interval,
            update_interval: interval,
            ..Self::default()
        }
    }

    /// Flush period for `class`, never shorter than [`MIN_FLUSH_INTERVAL`].
    #[must_use]
    pub fn interval(&self, class: BatchClass) -> Duration {
        let configured = match class {
            BatchClass::Add => self.add_interval,
            BatchClass::Get => self.get_interval,
            BatchClass::Update => self.update_interval,
        };
        configured.max(MIN_FLUSH_INTERVAL)
    }
}
