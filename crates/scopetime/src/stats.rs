// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Statistics over a sample series
//!
//! Standard deviation uses the population formula (divide by `count`).

use serde::Serialize;

use crate::clock::Micros;
use crate::error::{InstrumentError, InstrumentResult};

/// Statistics for a single label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    /// Number of times this scope was executed
    pub count: usize,
    /// Total time spent in this scope
    pub total: Micros,
    /// Minimum execution time
    pub min: Micros,
    /// Maximum execution time
    pub max: Micros,
    /// Average execution time
    pub mean: f64,
    /// Population standard deviation
    pub stdev: f64,
}

impl Stats {
    /// Calculate statistics from a slice of samples
    ///
    /// Returns [`InstrumentError::EmptySeries`] when `series` has no samples.
    pub fn compute(series: &[Micros]) -> InstrumentResult<Self> {
        let (&first, rest) = series.split_first().ok_or(InstrumentError::EmptySeries)?;

        let (total, min, max) = rest.iter().fold(
            (first, first, first),
            |(total, min, max), &x| (total.saturating_add(x), min.min(x), max.max(x)),
        );

        let count = series.len();
        let mean = total as f64 / count as f64;
        let variance = series
            .iter()
            .map(|&x| {
                let delta = x as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / count as f64;

        Ok(Self {
            count,
            total,
            min,
            max,
            mean,
            stdev: variance.sqrt(),
        })
    }

    /// Standard deviation as a percentage of the mean
    ///
    /// Zero when the mean is zero (every sample below one microsecond).
    pub fn relative_stdev(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.stdev * 100.0 / self.mean
        }
    }

    /// Share of `elapsed` spent in this label, in percent
    ///
    /// Nested or concurrent scopes can push this above 100.
    pub fn percent_of(&self, elapsed: Micros) -> f64 {
        if elapsed == 0 {
            0.0
        } else {
            self.total as f64 * 100.0 / elapsed as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_calculation() {
        let stats = Stats::compute(&[10, 20, 30]).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, 60);
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 30);
        assert_eq!(stats.mean, 20.0);
        assert!((stats.stdev - 8.164_965_809).abs() < 1e-6);
    }

    #[test]
    fn test_population_not_sample_stdev() {
        let stats = Stats::compute(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert_eq!(stats.mean, 5.0);
        // Sample stdev would be ~2.138
        assert!((stats.stdev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample() {
        let stats = Stats::compute(&[42]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 42);
        assert_eq!(stats.max, 42);
        assert_eq!(stats.stdev, 0.0);
        assert_eq!(stats.relative_stdev(), 0.0);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = Stats::compute(&[30, 10, 20]).unwrap();
        let b = Stats::compute(&[10, 20, 30]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        assert_eq!(Stats::compute(&[]), Err(InstrumentError::EmptySeries));
    }

    #[test]
    fn test_relative_stdev_with_zero_mean() {
        let stats = Stats::compute(&[0, 0, 0]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.relative_stdev(), 0.0);
        assert!(!stats.relative_stdev().is_nan());
    }

    #[test]
    fn test_relative_stdev() {
        let stats = Stats::compute(&[10, 20, 30]).unwrap();
        assert!((stats.relative_stdev() - 40.824_829).abs() < 1e-5);
    }

    #[test]
    fn test_percent_of_elapsed() {
        let stats = Stats::compute(&[25, 25]).unwrap();
        assert_eq!(stats.percent_of(200), 25.0);
        assert_eq!(stats.percent_of(0), 0.0);
        // Overlapping scopes may exceed the run time
        assert_eq!(stats.percent_of(25), 200.0);
    }
}
