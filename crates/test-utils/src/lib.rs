// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for scopetime
//!
//! This crate provides common testing components including:
//! - A manually advanced clock for deterministic timings
//! - A process-wide lock for tests that start a registry
//! - Report-specific assertions and a parser for rendered tables
//! - Sample series fixtures with hand-computed statistics

pub mod assertions;
pub mod fixtures;
pub mod lifecycle;
pub mod mock_clock;

// Re-exports for convenience
pub use assertions::{ParsedRow, ReportAssertions, parse_rendered_rows};
pub use fixtures::{SampleFixture, SampleFixtures};
pub use lifecycle::{lifecycle_lock, silent_config};
pub use mock_clock::ManualClock;
