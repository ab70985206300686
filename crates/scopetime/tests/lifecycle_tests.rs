// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Registry lifecycle tests
//!
//! Start/stop ordering, the single-live-registry rule, and teardown output.

#![cfg(feature = "profiling")]

use scopetime::{InstrumentError, Registry, global};
use scopetime_test_utils::{ReportAssertions, lifecycle_lock, silent_config};

fn start() -> Registry {
    Registry::builder().config(silent_config()).start().unwrap()
}

#[test]
fn test_teardown_reports_every_label() {
    let _lock = lifecycle_lock();
    let registry = start();

    for label in ["load", "parse", "load", "emit", "parse", "load"] {
        let _timer = registry.timer(label);
    }

    let report = registry.stop().unwrap();
    assert_eq!(report.len(), 3);
    ReportAssertions::assert_labels(&report, &["load", "parse", "emit"]);
    ReportAssertions::assert_calls(&report, "load", 3);
    ReportAssertions::assert_calls(&report, "parse", 2);
    ReportAssertions::assert_calls(&report, "emit", 1);
    ReportAssertions::assert_contiguous_indices(&report);
    ReportAssertions::assert_distinct_labels(&report);
}

#[test]
fn test_teardown_with_no_samples() {
    let _lock = lifecycle_lock();
    let report = start().stop().unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_second_explicit_registry_rejected() {
    let _lock = lifecycle_lock();
    let first = start();
    let second = Registry::builder().config(silent_config()).start();
    assert_eq!(second.unwrap_err(), InstrumentError::AlreadyStarted);
    first.stop().unwrap();
}

#[test]
fn test_global_after_explicit_rejected() {
    let _lock = lifecycle_lock();
    let explicit = start();
    assert_eq!(
        global::start_with(silent_config()),
        Err(InstrumentError::AlreadyStarted)
    );
    explicit.stop().unwrap();
}

#[test]
fn test_explicit_after_global_rejected() {
    let _lock = lifecycle_lock();
    global::start_with(silent_config()).unwrap();
    let explicit = Registry::builder().config(silent_config()).start();
    assert_eq!(explicit.unwrap_err(), InstrumentError::AlreadyStarted);
    global::stop().unwrap();
}

#[test]
fn test_global_twice_rejected() {
    let _lock = lifecycle_lock();
    global::start_with(silent_config()).unwrap();
    let err = global::start_with(silent_config()).unwrap_err();
    assert!(err.is_lifecycle_violation());
    global::stop().unwrap();
}

#[test]
fn test_restart_after_stop() {
    let _lock = lifecycle_lock();
    for round in 0..3 {
        let registry = start();
        registry.record("round", round).unwrap();
        let report = registry.stop().unwrap();
        ReportAssertions::assert_calls(&report, "round", 1);
    }
}

#[test]
fn test_stop_twice_and_late_timer() {
    let _lock = lifecycle_lock();
    let registry = start();
    registry.stop().unwrap();

    assert_eq!(registry.stop(), Err(InstrumentError::AlreadyStopped));
    assert_eq!(
        registry.try_timer("late").unwrap_err(),
        InstrumentError::NotRunning
    );
}

#[test]
fn test_global_misuse_before_start() {
    let _lock = lifecycle_lock();
    assert_eq!(global::stop(), Err(InstrumentError::NotStarted));
    assert_eq!(
        global::try_timer("early").unwrap_err(),
        InstrumentError::NotStarted
    );
    assert!(!global::is_running());
}

#[test]
fn test_drop_tears_down() {
    let _lock = lifecycle_lock();
    {
        let registry = start();
        registry.record("scoped", 3).unwrap();
    }
    // Slot was released by the drop-time teardown
    start().stop().unwrap();
}
