// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # scopetime - in-process scope profiler
//!
//! Measures how long labeled scopes take over one run of a program and prints
//! a per-label summary table when the run ends.
//!
//! ## Architecture
//!
//! ```text
//!   ScopeTimer (Drop) ──record──▶ Registry ──stop──▶ Report ──▶ stdout
//!        │                          │                  │
//!        └──────── Clock ◀──────────┘                Stats
//! ```
//!
//! - [`Clock`]: monotonic tick source
//! - [`ScopeTimer`]: guard that records one sample when it goes out of scope
//! - [`Registry`]: label → samples for the run; at most one is live per process
//! - [`Stats`]: count / total / min / max / mean / population stdev
//! - [`Report`]: fixed-column table built at teardown
//!
//! ## Feature flags
//!
//! - `profiling` (default): full instrumentation. Without it, [`Registry`],
//!   [`ScopeTimer`], [`global`] and the macros become zero-sized no-ops with
//!   the same signatures.
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "profiling")]
//! # {
//! use scopetime::{Registry, ReportConfig, ReportOutput};
//!
//! fn work(registry: &Registry, n: u64) -> u64 {
//!     scopetime::timed_fn!(registry);
//!     (0..n).sum()
//! }
//!
//! let registry = Registry::builder()
//!     .config(ReportConfig::default().with_output(ReportOutput::Silent))
//!     .start()?;
//! for n in 0..10 {
//!     work(&registry, n);
//! }
//! let report = registry.stop()?;
//! assert_eq!(report.row("work").unwrap().stats.count, 10);
//! # }
//! # Ok::<(), scopetime::InstrumentError>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod report;
pub mod stats;

mod macros;

// Only compile instrumentation when profiling feature is enabled
#[cfg(feature = "profiling")]
pub mod global;
#[cfg(feature = "profiling")]
mod registry;
#[cfg(feature = "profiling")]
mod timer;

#[cfg(not(feature = "profiling"))]
mod noop;

// Re-exports
pub use clock::{Clock, Micros, MonotonicClock, Ticks};
pub use config::{ConfigError, ReportConfig, ReportOrder, ReportOutput};
pub use error::{InstrumentError, InstrumentResult};
#[doc(hidden)]
pub use macros::__function_label;
pub use report::{Report, ReportRow};
pub use stats::Stats;

#[cfg(feature = "profiling")]
pub use registry::{Registry, RegistryBuilder};
#[cfg(feature = "profiling")]
pub use timer::ScopeTimer;

#[cfg(not(feature = "profiling"))]
pub use noop::{Registry, RegistryBuilder, ScopeTimer, global};
