//! Wall-clock source.
//!
//! Every top-level request samples "now" exactly once through a [`Clock`] and
//! passes the value down, so a multi-block hold sees one consistent instant.

use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDateTime};

/// Source of the facility-local current time.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the current facility-local time.
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<RwLock<NaiveDateTime>>,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: NaiveDateTime) -> Self {
        Self {
            instant: Arc::new(RwLock::new(instant)),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, instant: NaiveDateTime) {
        match self.instant.write() {
            Ok(mut guard) => *guard = instant,
            Err(poisoned) => *poisoned.into_inner() = instant,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.instant.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
