use argus_core::Timestamp;
use argus_ports::Clock;
use chrono::{Duration, Utc};
use parking_lot::RwLock;

/// Clock frozen at a given instant until explicitly moved
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    /// Freeze at the current wall-clock time
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Freeze at a specific instant
    pub fn at(time: Timestamp) -> Self {
        Self {
            current: RwLock::new(time),
        }
    }

    /// Move the clock forward (or backward, with a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write();
        *current += by;
    }

    /// Jump to an absolute instant
    pub fn set(&self, time: Timestamp) {
        *self.current.write() = time;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
