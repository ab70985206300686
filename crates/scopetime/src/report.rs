// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Final execution report
//!
//! A [`Report`] is a plain value built from the label → series mapping and
//! the run's elapsed time. Rendering is separate from building so the same
//! report can be printed, written to a buffer, or serialized.

use std::fmt::{self, Write as _};
use std::io;

use serde::Serialize;

use crate::clock::Micros;
use crate::config::{ReportConfig, ReportOrder};
use crate::error::InstrumentResult;
use crate::stats::Stats;

const HEADERS: [&str; 10] = [
    "#No",
    "function",
    "calls",
    "total time",
    "percent",
    "mean",
    "min",
    "max",
    "stdev",
    "relative",
];

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Zero-based position in the report
    pub index: usize,
    pub label: String,
    pub stats: Stats,
    /// `total / elapsed * 100`
    pub percent: f64,
    /// `stdev / mean * 100`, zero when the mean is zero
    pub relative_stdev: f64,
}

/// Report containing statistics for every recorded label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Total run time in microseconds
    pub elapsed: Micros,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Build a report from `(label, samples)` pairs given in first-seen order
    ///
    /// Fails with [`InstrumentError::EmptySeries`](crate::InstrumentError::EmptySeries)
    /// if any series has no samples.
    pub fn build<L, S>(
        elapsed: Micros,
        series: impl IntoIterator<Item = (L, S)>,
        order: ReportOrder,
    ) -> InstrumentResult<Self>
    where
        L: Into<String>,
        S: AsRef<[Micros]>,
    {
        let mut entries = series
            .into_iter()
            .map(|(label, samples)| {
                let label: String = label.into();
                Stats::compute(samples.as_ref()).map(|stats| (label, stats))
            })
            .collect::<InstrumentResult<Vec<_>>>()?;

        match order {
            ReportOrder::FirstSeen => {}
            ReportOrder::Label => entries.sort_by(|a, b| a.0.cmp(&b.0)),
            ReportOrder::TotalDesc => entries.sort_by(|a, b| b.1.total.cmp(&a.1.total)),
        }

        let rows = entries
            .into_iter()
            .enumerate()
            .map(|(index, (label, stats))| ReportRow {
                index,
                percent: stats.percent_of(elapsed),
                relative_stdev: stats.relative_stdev(),
                label,
                stats,
            })
            .collect();

        Ok(Self { elapsed, rows })
    }

    /// Number of rows (distinct labels)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the row for `label`
    pub fn row(&self, label: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    /// Render the report as a fixed-column table
    pub fn render(&self, config: &ReportConfig) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render_into(&mut out, config);
        out
    }

    /// Write the rendered table to `writer`
    pub fn write_to<W: io::Write>(
        &self,
        mut writer: W,
        config: &ReportConfig,
    ) -> InstrumentResult<()> {
        writer.write_all(self.render(config).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn render_into(&self, out: &mut String, config: &ReportConfig) -> fmt::Result {
        let iw = config.index_width;
        let lw = config.label_width;
        let cw = config.calls_width;
        let w = config.column_width;
        let p = config.precision;

        writeln!(out, "# Final execution report: total time = {}", self.elapsed)?;

        write!(out, "{:<iw$}{:<lw$}{:>cw$}", HEADERS[0], HEADERS[1], HEADERS[2])?;
        for header in &HEADERS[3..] {
            write!(out, "{header:>w$}")?;
        }
        writeln!(out)?;

        for row in &self.rows {
            let stats = &row.stats;
            write!(out, "{:<iw$}{:<lw$}{:>cw$}", row.index, row.label, stats.count)?;
            for value in [
                stats.total as f64,
                row.percent,
                stats.mean,
                stats.min as f64,
                stats.max as f64,
                stats.stdev,
                row.relative_stdev,
            ] {
                write!(out, "{value:>w$.p$}")?;
            }
            writeln!(out)?;
        }

        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&ReportConfig::default()))
    }
}
