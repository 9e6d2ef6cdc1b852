//! Argus Clock Infrastructure
//!
//! Time sources used to stamp broadcast events:
//!
//! - [`SystemClock`]: wall-clock time for production
//! - [`ManualClock`]: frozen time that only moves when told to, for tests
//!
//! ```ignore
//! use argus_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::at(start);
//! clock.advance(Duration::seconds(10));
//! assert_eq!(clock.now(), start + Duration::seconds(10));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use argus_ports::Clock;
