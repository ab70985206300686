// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Report-specific test helpers and custom assertions

use scopetime::{Report, Stats};

use crate::fixtures::SampleFixture;

const STDEV_TOLERANCE: f64 = 1e-9;

/// One data row of a rendered report, split on whitespace
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub index: usize,
    pub label: String,
    pub calls: usize,
    /// total, percent, mean, min, max, stdev, relative
    pub values: Vec<f64>,
    /// The numeric fields exactly as printed
    pub raw_values: Vec<String>,
}

/// Parse the data rows of a rendered report, skipping the title and header
///
/// Labels must not contain whitespace.
pub fn parse_rendered_rows(rendered: &str) -> Vec<ParsedRow> {
    rendered
        .lines()
        .skip(2)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(fields.len(), 10, "Expected 10 columns in row '{}'", line);
            ParsedRow {
                index: fields[0]
                    .parse()
                    .unwrap_or_else(|_| panic!("Bad index in row '{}'", line)),
                label: fields[1].to_string(),
                calls: fields[2]
                    .parse()
                    .unwrap_or_else(|_| panic!("Bad call count in row '{}'", line)),
                values: fields[3..]
                    .iter()
                    .map(|v| {
                        v.parse()
                            .unwrap_or_else(|_| panic!("Bad numeric field '{}' in '{}'", v, line))
                    })
                    .collect(),
                raw_values: fields[3..].iter().map(|v| v.to_string()).collect(),
            }
        })
        .collect()
}

/// Custom assertion helpers for report testing
pub struct ReportAssertions;

impl ReportAssertions {
    /// Assert that statistics match a fixture
    pub fn assert_stats_match(stats: &Stats, fixture: &SampleFixture) {
        assert_eq!(
            stats.count,
            fixture.samples.len(),
            "Count mismatch for '{}'",
            fixture.label
        );
        assert_eq!(stats.total, fixture.total, "Total mismatch for '{}'", fixture.label);
        assert_eq!(stats.min, fixture.min, "Min mismatch for '{}'", fixture.label);
        assert_eq!(stats.max, fixture.max, "Max mismatch for '{}'", fixture.label);
        assert_eq!(stats.mean, fixture.mean, "Mean mismatch for '{}'", fixture.label);
        assert!(
            (stats.stdev - fixture.stdev).abs() < STDEV_TOLERANCE,
            "Stdev mismatch for '{}': expected {}, found {}",
            fixture.label,
            fixture.stdev,
            stats.stdev
        );
    }

    /// Assert that row indices run 0..len with no gaps or repeats
    pub fn assert_contiguous_indices(report: &Report) {
        for (expected, row) in report.rows.iter().enumerate() {
            assert_eq!(
                row.index, expected,
                "Row '{}' has index {}, expected {}",
                row.label, row.index, expected
            );
        }
    }

    /// Assert that every label appears in exactly one row
    pub fn assert_distinct_labels(report: &Report) {
        let mut labels: Vec<&str> = report.rows.iter().map(|r| r.label.as_str()).collect();
        labels.sort_unstable();
        let before = labels.len();
        labels.dedup();
        assert_eq!(before, labels.len(), "Report contains duplicate labels");
    }

    /// Assert the report has exactly these labels, in this order
    pub fn assert_labels(report: &Report, expected: &[&str]) {
        let labels: Vec<&str> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, expected, "Report label order mismatch");
    }

    /// Assert the call count recorded for `label`
    pub fn assert_calls(report: &Report, label: &str, calls: usize) {
        let row = report
            .row(label)
            .unwrap_or_else(|| panic!("Label '{}' missing from report", label));
        assert_eq!(row.stats.count, calls, "Call count mismatch for '{}'", label);
    }

    /// Assert no numeric field in a rendered table is NaN or infinite
    pub fn assert_all_finite(rendered: &str) {
        for row in parse_rendered_rows(rendered) {
            for value in &row.values {
                assert!(value.is_finite(), "Non-finite value in row '{}'", row.label);
            }
        }
    }
}
