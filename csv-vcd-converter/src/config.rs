//! Converter configuration types
//!
//! This module defines the knobs a single conversion accepts. The defaults
//! reproduce the strict behavior: values passed through unchecked, the first
//! malformed row aborts the run, and output is only published on success.

use crate::types::TimeUnit;

/// How signal values other than 0/1 are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValuePolicy {
    /// Any integer is accepted and written as the bit value
    #[default]
    PassThrough,
    /// Values other than 0 and 1 fail the row
    RejectNonBinary,
}

/// What happens when a data row after the first one cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// The whole conversion fails
    #[default]
    FailFast,
    /// The row is logged and dropped; the previous sample stays current
    SkipMalformed,
}

/// Configuration for one CSV to VCD conversion
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Unit written to `$timescale`
    pub time_unit: TimeUnit,

    pub value_policy: ValuePolicy,

    pub row_policy: RowPolicy,

    /// Write to a temporary file and move it into place only on success
    pub atomic_output: bool,

    /// Fixed `$date` text (default: local time at conversion)
    pub date: Option<String>,

    /// `$scope module` name (default: input file stem)
    pub module_name: Option<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::default(),
            value_policy: ValuePolicy::default(),
            row_policy: RowPolicy::default(),
            atomic_output: true,
            date: None,
            module_name: None,
        }
    }
}

impl ConvertConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the `$timescale` unit
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Builder method: set how non-binary values are handled
    pub fn with_value_policy(mut self, policy: ValuePolicy) -> Self {
        self.value_policy = policy;
        self
    }

    /// Builder method: set how malformed rows are handled
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// Builder method: enable or disable atomic output
    pub fn with_atomic_output(mut self, enabled: bool) -> Self {
        self.atomic_output = enabled;
        self
    }

    /// Builder method: pin the `$date` text
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builder method: override the `$scope module` name
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// The `$date` text for a conversion starting now
    pub fn date_text(&self) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => chrono::Local::now()
                .format("%a %b %e %H:%M:%S %Y")
                .to_string(),
        }
    }
}
