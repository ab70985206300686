// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Timing registry
//!
//! Holds the label → sample series mapping for one run. At most one registry
//! is live per process; starting a second one while the first is running
//! fails with [`InstrumentError::AlreadyStarted`].
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
//!     let _timer = registry.timer("load");
//!     // ... work ...
//! }
//! let report = registry.stop()?;
//! assert_eq!(report.row("load").unwrap().stats.count, 1);
//! # }
//! # Ok::<(), scopetime::InstrumentError>(())
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::clock::{Clock, Micros, MonotonicClock, Ticks, micros_between};
use crate::config::{ReportConfig, ReportOutput};
use crate::error::{InstrumentError, InstrumentResult};
use crate::report::Report;
use crate::timer::ScopeTimer;

/// Set while a registry is live anywhere in the process
static LIVE: AtomicBool = AtomicBool::new(false);

/// Label → samples, remembering first-seen order
#[derive(Debug, Default)]
struct SeriesMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, Vec<Micros>)>,
}

impl SeriesMap {
    /// Append a sample, returning `true` if the label is new
    fn push(&mut self, label: &str, sample: Micros) -> bool {
        if let Some(&slot) = self.index.get(label) {
            self.entries[slot].1.push(sample);
            return false;
        }

        self.index.insert(label.to_string(), self.entries.len());
        self.entries.push((label.to_string(), vec![sample]));
        true
    }
}

/// Builder for a [`Registry`] with a custom clock or report configuration
#[derive(Default)]
pub struct RegistryBuilder {
    config: ReportConfig,
    clock: Option<Box<dyn Clock>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report layout and destination used at teardown
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the monotonic clock, mostly useful in tests
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Claim the process-wide slot and start the run
    pub fn start(self) -> InstrumentResult<Registry> {
        if LIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(InstrumentError::AlreadyStarted);
        }

        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(MonotonicClock::new()));
        let run_start = clock.now();

        tracing::debug!(
            order = ?self.config.order,
            output = ?self.config.output,
            "timing registry started"
        );

        Ok(Registry {
            clock,
            config: self.config,
            run_start,
            running: AtomicBool::new(true),
            series: Mutex::new(SeriesMap::default()),
        })
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("config", &self.config)
            .field("custom_clock", &self.clock.is_some())
            .finish()
    }
}

/// Process-wide timing registry for one run
///
/// Dropping a registry that is still running tears it down and prints the
/// report, so a registry bound at the top of `main` reports when `main` ends.
pub struct Registry {
    clock: Box<dyn Clock>,
    config: ReportConfig,
    run_start: Ticks,
    running: AtomicBool,
    series: Mutex<SeriesMap>,
}

impl Registry {
    /// Start a registry with the monotonic clock and default report layout
    pub fn start() -> InstrumentResult<Self> {
        RegistryBuilder::new().start()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Whether `stop` has not yet been called
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Current clock reading
    pub fn now(&self) -> Ticks {
        self.clock.now()
    }

    /// Microseconds since the run started
    pub fn elapsed(&self) -> Micros {
        micros_between(self.run_start, self.clock.now())
    }

    /// Append one sample to the series for `label`
    pub fn record(&self, label: &str, sample: Micros) -> InstrumentResult<()> {
        if label.is_empty() {
            return Err(InstrumentError::InvalidLabel(label.to_string()));
        }

        let is_new = {
            let mut series = self.lock_series();
            // Checked under the lock so a concurrent stop cannot strand the sample
            if !self.is_running() {
                return Err(InstrumentError::NotRunning);
            }
            series.push(label, sample)
        };

        // Logged after the lock is released; a subscriber may record into us
        if is_new {
            tracing::debug!(label, "new timing label");
        }
        Ok(())
    }

    /// Start timing `label` until the returned guard is dropped
    ///
    /// # Panics
    ///
    /// Panics if the registry has been stopped or `label` is empty.
    pub fn timer(&self, label: impl Into<Cow<'static, str>>) -> ScopeTimer<&Self> {
        ScopeTimer::new(self, label)
    }

    /// Non-panicking variant of [`Registry::timer`]
    pub fn try_timer(
        &self,
        label: impl Into<Cow<'static, str>>,
    ) -> InstrumentResult<ScopeTimer<&Self>> {
        ScopeTimer::try_new(self, label)
    }

    /// Build a report from the samples recorded so far without stopping
    pub fn snapshot(&self) -> InstrumentResult<Report> {
        let series = self.lock_series();
        Report::build(
            self.elapsed(),
            series
                .entries
                .iter()
                .map(|(label, samples)| (label.as_str(), samples.as_slice())),
            self.config.order,
        )
    }

    /// Tear the run down: build the report, write it to the configured
    /// output and release the process-wide slot
    ///
    /// A failed write is logged; the report is still returned.
    /// Returns [`InstrumentError::AlreadyStopped`] on a second call.
    pub fn stop(&self) -> InstrumentResult<Report> {
        match self.config.output {
            ReportOutput::Stdout => self.stop_into(Some(io::stdout())),
            ReportOutput::Stderr => self.stop_into(Some(io::stderr())),
            ReportOutput::Silent => self.stop_into(None::<io::Sink>),
        }
    }

    fn stop_into<W: io::Write>(&self, output: Option<W>) -> InstrumentResult<Report> {
        let taken = {
            let mut series = self.lock_series();
            if self
                .running
                .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return Err(InstrumentError::AlreadyStopped);
            }
            std::mem::take(&mut *series)
        };

        let elapsed = self.elapsed();
        LIVE.store(false, Ordering::Release);

        tracing::debug!(
            elapsed_us = elapsed,
            labels = taken.entries.len(),
            "timing registry stopped"
        );

        let report = Report::build(elapsed, taken.entries, self.config.order)?;
        if let Some(writer) = output {
            if let Err(err) = report.write_to(writer, &self.config) {
                tracing::error!(error = %err, "failed to write timing report");
            }
        }
        Ok(report)
    }

    fn lock_series(&self) -> MutexGuard<'_, SeriesMap> {
        // Append-only data stays consistent even if a holder panicked
        self.series.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Err(err) = self.stop() {
            tracing::error!(error = %err, "failed to tear down timing registry");
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("running", &self.is_running())
            .field("run_start", &self.run_start)
            .field("labels", &self.lock_series().entries.len())
            .finish_non_exhaustive()
    }
}

/// Serialises tests that claim the process-wide registry slot
#[cfg(test)]
pub(crate) fn test_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicU64;

    #[derive(Clone, Default)]
    struct StepClock(Arc<AtomicU64>);

    impl StepClock {
        fn advance_micros(&self, micros: u64) {
            self.0.fetch_add(micros * 1_000, Ordering::SeqCst);
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> Ticks {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn silent() -> ReportConfig {
        ReportConfig::default().with_output(ReportOutput::Silent)
    }

    #[test]
    fn test_record_and_stop() {
        let _lock = test_lock();
        let registry = Registry::builder().config(silent()).start().unwrap();

        registry.record("a", 10).unwrap();
        registry.record("b", 5).unwrap();
        registry.record("a", 30).unwrap();

        let report = registry.stop().unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.rows[0].label, "a");
        assert_eq!(report.rows[0].stats.count, 2);
        assert_eq!(report.rows[0].stats.total, 40);
        assert_eq!(report.rows[1].label, "b");
    }

    #[test]
    fn test_second_registry_is_rejected() {
        let _lock = test_lock();
        let first = Registry::builder().config(silent()).start().unwrap();

        assert_eq!(
            Registry::builder().config(silent()).start().unwrap_err(),
            InstrumentError::AlreadyStarted
        );

        first.stop().unwrap();
        let second = Registry::builder().config(silent()).start().unwrap();
        second.stop().unwrap();
    }

    #[test]
    fn test_drop_releases_slot() {
        let _lock = test_lock();
        {
            let registry = Registry::builder().config(silent()).start().unwrap();
            registry.record("dropped", 1).unwrap();
        }
        let registry = Registry::builder().config(silent()).start().unwrap();
        assert!(registry.is_running());
    }

    #[test]
    fn test_stop_twice_is_an_error() {
        let _lock = test_lock();
        let registry = Registry::builder().config(silent()).start().unwrap();
        registry.stop().unwrap();
        assert_eq!(registry.stop(), Err(InstrumentError::AlreadyStopped));
    }

    #[test]
    fn test_record_after_stop_is_rejected() {
        let _lock = test_lock();
        let registry = Registry::builder().config(silent()).start().unwrap();
        registry.stop().unwrap();
        assert_eq!(registry.record("late", 1), Err(InstrumentError::NotRunning));
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let _lock = test_lock();
        let registry = Registry::builder().config(silent()).start().unwrap();
        assert!(matches!(
            registry.record("", 1),
            Err(InstrumentError::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_elapsed_uses_injected_clock() {
        let _lock = test_lock();
        let clock = StepClock::default();
        let registry = Registry::builder()
            .config(silent())
            .clock(clock.clone())
            .start()
            .unwrap();

        {
            let _timer = registry.timer("step");
            clock.advance_micros(250);
        }
        clock.advance_micros(750);

        let report = registry.stop().unwrap();
        assert_eq!(report.elapsed, 1_000);
        let row = report.row("step").unwrap();
        assert_eq!(row.stats.total, 250);
        assert_eq!(row.percent, 25.0);
    }

    #[test]
    fn test_snapshot_keeps_running() {
        let _lock = test_lock();
        let registry = Registry::builder().config(silent()).start().unwrap();
        registry.record("a", 1).unwrap();

        let snapshot = registry.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(registry.is_running());

        registry.record("a", 2).unwrap();
        let report = registry.stop().unwrap();
        assert_eq!(report.row("a").unwrap().stats.count, 2);
    }

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stop_keeps_report_when_output_fails() {
        let _lock = test_lock();
        let registry = Registry::builder().config(silent()).start().unwrap();
        registry.record("kept", 7).unwrap();

        let report = registry.stop_into(Some(BrokenPipe)).unwrap();
        assert_eq!(report.row("kept").unwrap().stats.total, 7);
        assert!(!registry.is_running());

        // The slot is released even though the write failed
        let next = Registry::builder().config(silent()).start().unwrap();
        next.stop().unwrap();
    }

    /// Records every tracing event back into the registry it observes
    struct RecordingLayer(Arc<Registry>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for RecordingLayer {
        fn on_event(
            &self,
            _event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let _ = self.0.record("log_event", 1);
        }
    }

    #[test]
    fn test_subscriber_can_record_into_registry() {
        use tracing_subscriber::layer::SubscriberExt;

        let _lock = test_lock();
        let registry = Arc::new(Registry::builder().config(silent()).start().unwrap());
        let subscriber =
            tracing_subscriber::registry().with(RecordingLayer(Arc::clone(&registry)));

        tracing::subscriber::with_default(subscriber, || {
            // The new-label event fires the layer, which records again
            registry.record("work", 1).unwrap();
        });

        let report = registry.stop().unwrap();
        assert_eq!(report.row("work").unwrap().stats.count, 1);
        assert_eq!(report.row("log_event").unwrap().stats.count, 2);
    }

    #[test]
    fn test_concurrent_records() {
        let _lock = test_lock();
        let registry = Registry::builder().config(silent()).start().unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for i in 0..100 {
                        registry.record("shared", i).unwrap();
                    }
                });
            }
        });

        let report = registry.stop().unwrap();
        assert_eq!(report.row("shared").unwrap().stats.count, 800);
    }
}
