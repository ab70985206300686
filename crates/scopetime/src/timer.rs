// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scoped timing guard
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "profiling")]
//! # {
//! use scopetime::{Registry, ReportConfig, ReportOutput};
//!
//! let registry = Registry::builder()
//!     .config(ReportConfig::default().with_output(ReportOutput::Silent))
//!     .start()?;
//! {
//!     let _timer = registry.timer("my_operation");
//!     // ... do work ...
//! } // Timer automatically records elapsed time when dropped
//! # registry.stop()?;
//! # }
//! # Ok::<(), scopetime::InstrumentError>(())
//! ```

use std::borrow::{Borrow, Cow};
use std::fmt;

use crate::clock::{Micros, Ticks, micros_between};
use crate::error::{InstrumentError, InstrumentResult};
use crate::registry::Registry;

/// A scoped timer that measures one execution of a labeled scope
///
/// Records into the registry when dropped, on every exit path: normal
/// return, `?` propagation and unwinding all run `Drop`. `R` is any handle
/// to the registry, typically `&Registry` or `Arc<Registry>`.
///
/// Nested timers with the same label are independent; the outer sample
/// includes the inner one.
pub struct ScopeTimer<R: Borrow<Registry>> {
    registry: R,
    label: Cow<'static, str>,
    start: Ticks,
}

impl<R: Borrow<Registry>> ScopeTimer<R> {
    /// Start timing `label` against `registry`
    ///
    /// # Panics
    ///
    /// Panics if the registry is no longer running or the label is empty.
    /// Both are ordering bugs in the caller, not runtime conditions.
    pub fn new(registry: R, label: impl Into<Cow<'static, str>>) -> Self {
        match Self::try_new(registry, label) {
            Ok(timer) => timer,
            Err(err) => panic!("cannot start scope timer: {err}"),
        }
    }

    /// Start timing `label`, returning the lifecycle error instead of panicking
    pub fn try_new(registry: R, label: impl Into<Cow<'static, str>>) -> InstrumentResult<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(InstrumentError::InvalidLabel(label.into_owned()));
        }
        if !registry.borrow().is_running() {
            return Err(InstrumentError::NotRunning);
        }

        let start = registry.borrow().now();
        Ok(Self {
            registry,
            label,
            start,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Time spent in the scope so far, without recording it
    pub fn elapsed(&self) -> Micros {
        micros_between(self.start, self.registry.borrow().now())
    }
}

impl<R: Borrow<Registry>> Drop for ScopeTimer<R> {
    fn drop(&mut self) {
        let registry = self.registry.borrow();
        let sample = micros_between(self.start, registry.now());
        if let Err(err) = registry.record(&self.label, sample) {
            tracing::warn!(label = %self.label, error = %err, "dropping timing sample");
        }
    }
}

impl<R: Borrow<Registry>> fmt::Debug for ScopeTimer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeTimer")
            .field("label", &self.label)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}
