// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Manually advanced clock

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use scopetime::{Clock, Micros, Ticks};

/// Clock that only moves when the test tells it to
///
/// Clones share the same reading, so one clone can be handed to the
/// registry while the test keeps another to advance time.
///
/// # Example
///
/// ```rust,ignore
/// let clock = ManualClock::new();
/// let registry = Registry::builder().clock(clock.clone()).start()?;
/// {
///     let _timer = registry.timer("step");
///     clock.advance_micros(250);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `micros` microseconds
    pub fn advance_micros(&self, micros: Micros) {
        self.nanos.fetch_add(micros * 1_000, Ordering::SeqCst);
    }

    /// Move the clock forward by raw nanosecond ticks
    pub fn advance_ticks(&self, ticks: Ticks) {
        self.nanos.fetch_add(ticks, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Ticks {
        self.nanos.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance_micros(3);
        handle.advance_ticks(500);
        assert_eq!(clock.now(), 3_500);
    }
}
