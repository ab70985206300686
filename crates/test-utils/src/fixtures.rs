// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Sample series with hand-computed statistics

use scopetime::Micros;

/// A sample series and the statistics it must produce
#[derive(Debug, Clone)]
pub struct SampleFixture {
    pub label: &'static str,
    pub samples: &'static [Micros],
    pub total: Micros,
    pub min: Micros,
    pub max: Micros,
    pub mean: f64,
    /// Population standard deviation
    pub stdev: f64,
}

/// Sample series for testing
pub struct SampleFixtures;

impl SampleFixtures {
    /// Three evenly spaced samples
    pub const fn ascending() -> SampleFixture {
        SampleFixture {
            label: "ascending",
            samples: &[10, 20, 30],
            total: 60,
            min: 10,
            max: 30,
            mean: 20.0,
            stdev: 8.164_965_809_277_26,
        }
    }

    /// Textbook population-stdev example
    pub const fn textbook() -> SampleFixture {
        SampleFixture {
            label: "textbook",
            samples: &[2, 4, 4, 4, 5, 5, 7, 9],
            total: 40,
            min: 2,
            max: 9,
            mean: 5.0,
            stdev: 2.0,
        }
    }

    /// Every sample identical
    pub const fn constant() -> SampleFixture {
        SampleFixture {
            label: "constant",
            samples: &[7, 7, 7, 7],
            total: 28,
            min: 7,
            max: 7,
            mean: 7.0,
            stdev: 0.0,
        }
    }

    /// Sub-microsecond scopes truncate to zero
    pub const fn all_zero() -> SampleFixture {
        SampleFixture {
            label: "all_zero",
            samples: &[0, 0, 0],
            total: 0,
            min: 0,
            max: 0,
            mean: 0.0,
            stdev: 0.0,
        }
    }

    /// One call only
    pub const fn single() -> SampleFixture {
        SampleFixture {
            label: "single",
            samples: &[1_234],
            total: 1_234,
            min: 1_234,
            max: 1_234,
            mean: 1_234.0,
            stdev: 0.0,
        }
    }

    pub fn all() -> Vec<SampleFixture> {
        vec![
            Self::ascending(),
            Self::textbook(),
            Self::constant(),
            Self::all_zero(),
            Self::single(),
        ]
    }
}
