// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Report configuration
//!
//! Controls the layout, row order and destination of the final report.
//!
//! ## Example
//!
//! ```rust
//! use scopetime::{ReportConfig, ReportOrder, ReportOutput};
//!
//! let config = ReportConfig::default()
//!     .with_order(ReportOrder::TotalDesc)
//!     .with_output(ReportOutput::Stderr)
//!     .with_precision(3);
//! assert!(config.validate().is_ok());
//! ```

use serde::Serialize;
use serde_json::Value;

const MAX_PRECISION: usize = 9;

/// Order in which labels appear in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReportOrder {
    /// Order in which each label was first recorded
    #[default]
    FirstSeen,
    /// Alphabetical by label
    Label,
    /// Largest total time first
    TotalDesc,
}

impl ReportOrder {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "first-seen" | "first_seen" | "firstseen" => Some(ReportOrder::FirstSeen),
            "label" | "name" => Some(ReportOrder::Label),
            "total" | "total-desc" | "total_desc" => Some(ReportOrder::TotalDesc),
            _ => None,
        }
    }
}

/// Where the report is written at teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReportOutput {
    #[default]
    Stdout,
    Stderr,
    /// Build the report but do not print it
    Silent,
}

impl ReportOutput {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "stdout" => Some(ReportOutput::Stdout),
            "stderr" => Some(ReportOutput::Stderr),
            "silent" | "none" | "off" => Some(ReportOutput::Silent),
            _ => None,
        }
    }
}

/// Report layout and destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportConfig {
    /// Width of the `#No` column
    pub index_width: usize,

    /// Width of the label column
    /// Longer labels are printed in full and push the rest of the row
    pub label_width: usize,

    /// Width of the `calls` column
    pub calls_width: usize,

    /// Width of every remaining numeric column
    pub column_width: usize,

    /// Digits after the decimal point for numeric columns
    pub precision: usize,

    /// Row order
    pub order: ReportOrder,

    /// Report destination
    pub output: ReportOutput,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            index_width: 6,
            label_width: 25,
            calls_width: 8,
            column_width: 16,
            precision: 2,
            order: ReportOrder::FirstSeen,
            output: ReportOutput::Stdout,
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: ReportOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_output(mut self, output: ReportOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_label_width(mut self, width: usize) -> Self {
        self.label_width = width;
        self
    }

    /// Validate the configuration
    ///
    /// Checks that every column has a non-zero width and the precision is sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widths = [
            ("index_width", self.index_width),
            ("label_width", self.label_width),
            ("calls_width", self.calls_width),
            ("column_width", self.column_width),
        ];
        if let Some((name, _)) = widths.iter().find(|(_, width)| *width == 0) {
            return Err(ConfigError::ZeroWidth {
                column: (*name).to_string(),
            });
        }

        if self.precision > MAX_PRECISION {
            return Err(ConfigError::PrecisionTooLarge {
                precision: self.precision,
                max: MAX_PRECISION,
            });
        }

        Ok(())
    }

    /// Parse report config from a settings payload.
    ///
    /// Expected shape (every field optional):
    /// {
    ///   "scopetime": {
    ///     "order": "first-seen" | "label" | "total",
    ///     "output": "stdout" | "stderr" | "silent",
    ///     "precision": 2,
    ///     "labelWidth": 25
    ///   }
    /// }
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let Some(section) = settings.get("scopetime") else {
            return Ok(config);
        };

        if let Some(order) = section.get("order").and_then(Value::as_str) {
            config.order = ReportOrder::parse(order).ok_or_else(|| ConfigError::InvalidValue {
                key: "order".to_string(),
                value: order.to_string(),
            })?;
        }

        if let Some(output) = section.get("output").and_then(Value::as_str) {
            config.output =
                ReportOutput::parse(output).ok_or_else(|| ConfigError::InvalidValue {
                    key: "output".to_string(),
                    value: output.to_string(),
                })?;
        }

        if let Some(precision) = section.get("precision").and_then(Value::as_u64) {
            config.precision = precision as usize;
        }

        if let Some(width) = section.get("labelWidth").and_then(Value::as_u64) {
            config.label_width = width as usize;
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a config from `SCOPETIME_ORDER`, `SCOPETIME_OUTPUT` and
    /// `SCOPETIME_PRECISION`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(order) = lookup("SCOPETIME_ORDER") {
            config.order = ReportOrder::parse(&order).ok_or(ConfigError::InvalidValue {
                key: "SCOPETIME_ORDER".to_string(),
                value: order,
            })?;
        }

        if let Some(output) = lookup("SCOPETIME_OUTPUT") {
            config.output = ReportOutput::parse(&output).ok_or(ConfigError::InvalidValue {
                key: "SCOPETIME_OUTPUT".to_string(),
                value: output,
            })?;
        }

        if let Some(precision) = lookup("SCOPETIME_PRECISION") {
            config.precision = precision.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SCOPETIME_PRECISION".to_string(),
                value: precision,
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A column was configured with zero width
    #[error("Column '{column}' must have a non-zero width")]
    ZeroWidth { column: String },

    /// Precision beyond what is meaningful for microsecond samples
    #[error("Precision {precision} exceeds the maximum of {max}")]
    PrecisionTooLarge { precision: usize, max: usize },

    /// Unrecognised setting value
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_default_matches_classic_layout() {
        let config = ReportConfig::default();
        assert_eq!(config.index_width, 6);
        assert_eq!(config.label_width, 25);
        assert_eq!(config.calls_width, 8);
        assert_eq!(config.column_width, 16);
        assert_eq!(config.precision, 2);
        assert_eq!(config.order, ReportOrder::FirstSeen);
        assert_eq!(config.output, ReportOutput::Stdout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let config = ReportConfig::default().with_label_width(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroWidth {
                column: "label_width".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_large_precision() {
        let config = ReportConfig::default().with_precision(12);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PrecisionTooLarge { precision: 12, .. })
        ));
    }

    #[test]
    fn test_from_settings() {
        let settings = json!({
            "scopetime": {
                "order": "total",
                "output": "silent",
                "precision": 4,
                "labelWidth": 40
            }
        });

        let config = ReportConfig::from_settings(&settings).unwrap();
        assert_eq!(config.order, ReportOrder::TotalDesc);
        assert_eq!(config.output, ReportOutput::Silent);
        assert_eq!(config.precision, 4);
        assert_eq!(config.label_width, 40);
    }

    #[test]
    fn test_from_settings_missing_section_uses_defaults() {
        let config = ReportConfig::from_settings(&json!({ "other": 1 })).unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_from_settings_rejects_unknown_order() {
        let settings = json!({ "scopetime": { "order": "random" } });
        assert!(matches!(
            ReportConfig::from_settings(&settings),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SCOPETIME_ORDER", "label"),
            ("SCOPETIME_OUTPUT", "stderr"),
            ("SCOPETIME_PRECISION", "1"),
        ]);

        let config = ReportConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.order, ReportOrder::Label);
        assert_eq!(config.output, ReportOutput::Stderr);
        assert_eq!(config.precision, 1);
    }

    #[test]
    fn test_from_lookup_rejects_bad_precision() {
        let result = ReportConfig::from_lookup(|key| {
            (key == "SCOPETIME_PRECISION").then(|| "two".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
