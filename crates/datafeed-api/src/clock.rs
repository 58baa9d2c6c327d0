//! Server-side write clock.
//!
//! Every stored data point is stamped by [`ServerClock::now`]. Timestamps
//! are truncated to whole microseconds (the resolution of `PostgreSQL`
//! `timestamptz`) and never go backwards within one process, even if the
//! system clock is stepped back. No ordering holds across processes.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Monotonic, microsecond-resolution wall clock.
#[derive(Debug)]
pub struct ServerClock {
    /// Latest timestamp handed out, in microseconds since the Unix epoch.
    last_micros: AtomicI64,
}

impl ServerClock {
    /// Create a clock that has not issued any timestamp yet.
    pub const fn new() -> Self {
        Self {
            last_micros: AtomicI64::new(i64::MIN),
        }
    }

    /// Current wall-clock time, never earlier than any previous result.
    pub fn now(&self) -> DateTime<Utc> {
        self.at(Utc::now())
    }

    fn at(&self, wall: DateTime<Utc>) -> DateTime<Utc> {
        let micros = wall.timestamp_micros();
        let previous = self.last_micros.fetch_max(micros, Ordering::SeqCst);
        let issued = micros.max(previous);
        DateTime::from_timestamp_micros(issued).unwrap_or(wall)
    }
}

impl Default for ServerClock {
    fn default() -> Self {
        Self::new()
    }
}
