// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Process-global registry used by the `timed_scope!` / `timed_fn!` macros
//!
//! The global slot holds an `Arc<Registry>` so timers can be created from any
//! thread without threading a handle through every call.
//!
//! ```rust
//! # #[cfg(feature = "profiling")]
//! # {
//! use scopetime::{ReportConfig, ReportOutput, global};
//!
//! global::start_with(ReportConfig::default().with_output(ReportOutput::Silent))?;
//! {
//!     let _timer = global::timer("startup");
//! }
//! let report = global::stop()?;
//! assert_eq!(report.len(), 1);
//! # }
//! # Ok::<(), scopetime::InstrumentError>(())
//! ```

use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock};

use crate::clock::Micros;
use crate::config::ReportConfig;
use crate::error::{InstrumentError, InstrumentResult};
use crate::registry::Registry;
use crate::report::Report;
use crate::timer::ScopeTimer;

static GLOBAL: RwLock<Option<Arc<Registry>>> = RwLock::new(None);

/// Start the global registry with the default report layout
pub fn start() -> InstrumentResult<()> {
    start_with(ReportConfig::default())
}

/// Start the global registry
///
/// Fails with [`InstrumentError::AlreadyStarted`] if any registry is live.
pub fn start_with(config: ReportConfig) -> InstrumentResult<()> {
    let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(InstrumentError::AlreadyStarted);
    }
    let registry = Registry::builder().config(config).start()?;
    *slot = Some(Arc::new(registry));
    Ok(())
}

/// Stop the global registry and print its report
///
/// Fails with [`InstrumentError::NotStarted`] if there is no global registry,
/// including when it was already stopped.
pub fn stop() -> InstrumentResult<Report> {
    let registry = GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .ok_or(InstrumentError::NotStarted)?;
    registry.stop()
}

pub fn is_running() -> bool {
    current().is_some_and(|registry| registry.is_running())
}

/// Handle to the live global registry
pub fn current() -> Option<Arc<Registry>> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(Arc::clone)
}

/// Record a pre-measured sample into the global registry
pub fn record(label: &str, sample: Micros) -> InstrumentResult<()> {
    current().ok_or(InstrumentError::NotStarted)?.record(label, sample)
}

/// Time `label` against the global registry
///
/// # Panics
///
/// Panics if the global registry has not been started.
pub fn timer(label: impl Into<Cow<'static, str>>) -> ScopeTimer<Arc<Registry>> {
    match try_timer(label) {
        Ok(timer) => timer,
        Err(err) => panic!("cannot start scope timer: {err}"),
    }
}

/// Non-panicking variant of [`timer`]
pub fn try_timer(
    label: impl Into<Cow<'static, str>>,
) -> InstrumentResult<ScopeTimer<Arc<Registry>>> {
    let registry = current().ok_or(InstrumentError::NotStarted)?;
    ScopeTimer::try_new(registry, label)
}

/// Start the global registry for the lifetime of the returned guard
pub fn run() -> InstrumentResult<RunGuard> {
    run_with(ReportConfig::default())
}

pub fn run_with(config: ReportConfig) -> InstrumentResult<RunGuard> {
    start_with(config)?;
    Ok(RunGuard { active: true })
}

/// Stops the global registry and prints the report when dropped
#[derive(Debug)]
#[must_use = "the run ends as soon as the guard is dropped"]
pub struct RunGuard {
    active: bool,
}

impl RunGuard {
    /// End the run now and hand back the report
    pub fn finish(mut self) -> InstrumentResult<Report> {
        self.active = false;
        stop()
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Err(err) = stop() {
            tracing::error!(error = %err, "failed to stop global timing registry");
        }
    }
}
