// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Monotonic clock source
//!
//! Ticks are nanoseconds since a process-wide anchor. Only the difference
//! between two readings is meaningful.

use std::sync::OnceLock;
use std::time::Instant;

/// Raw clock reading in nanoseconds
pub type Ticks = u64;

/// Recorded sample unit: whole microseconds
pub type Micros = u64;

const NANOS_PER_MICRO: u64 = 1_000;

/// A monotonic, non-decreasing tick source
pub trait Clock: Send + Sync {
    /// Current reading in nanoseconds
    fn now(&self) -> Ticks;
}

/// Convert the span between two readings into microseconds
///
/// Saturates at zero so a misbehaving clock can never produce a negative span.
pub fn micros_between(start: Ticks, end: Ticks) -> Micros {
    end.saturating_sub(start) / NANOS_PER_MICRO
}

/// Clock backed by [`std::time::Instant`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub fn new() -> Self {
        // Pin the anchor as early as possible so the first reading is cheap
        anchor();
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Ticks {
        let nanos = anchor().elapsed().as_nanos();
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }
}

fn anchor() -> Instant {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    *ANCHOR.get_or_init(Instant::now)
}
