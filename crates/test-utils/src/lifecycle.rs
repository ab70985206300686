// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Helpers for tests that start a registry
//!
//! Only one registry may be live per process and the test harness runs tests
//! on parallel threads, so every test that starts one holds
//! [`lifecycle_lock`] for its whole body.

use std::sync::{Mutex, MutexGuard, PoisonError};

use scopetime::{ReportConfig, ReportOutput};

static LIFECYCLE: Mutex<()> = Mutex::new(());

/// Serialise registry lifecycles within this test binary
///
/// A test that panicked while holding the lock does not poison it for the rest.
pub fn lifecycle_lock() -> MutexGuard<'static, ()> {
    LIFECYCLE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Default report layout that keeps test output clean
pub fn silent_config() -> ReportConfig {
    ReportConfig::default().with_output(ReportOutput::Silent)
}
