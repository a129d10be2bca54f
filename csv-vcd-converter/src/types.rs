//! Core types for the CSV to VCD converter library
//!
//! This module defines the values that flow through a conversion: parsed
//! samples, per-row change sets, the VCD time unit, and the error type.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Input file not found: {0:?}")]
    InputNotFound(PathBuf),

    #[error("Output path is not a regular file: {0:?}")]
    OutputPathInvalid(PathBuf),

    #[error("Too many signals: {signals} columns but only {capacity} symbols available")]
    CapacityExceeded { signals: usize, capacity: usize },

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Non-binary value {value} for signal '{signal}' at line {line}")]
    MalformedSample {
        line: usize,
        signal: String,
        value: i64,
    },

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(String),

    #[error("Input has no {0}")]
    EmptyInput(&'static str),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One parsed data row: a timestamp and one value per signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Raw timestamp from the first CSV column, passed through to VCD verbatim
    pub timestamp: u64,
    /// Signal values in header column order
    pub values: Vec<i64>,
    /// 1-based line number in the input (for diagnostics)
    pub line: usize,
}

/// The signals whose value differs between two consecutive samples
///
/// Built fresh for every row; entries follow signal table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    pub timestamp: u64,
    pub changes: Vec<(char, i64)>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

/// VCD `$timescale` unit, expressed in whole nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnit {
    pub nanoseconds: u64,
}

impl TimeUnit {
    pub fn from_nanoseconds(nanoseconds: u64) -> Self {
        Self { nanoseconds }
    }

    /// Derive the time unit from a sample rate in Hz: `round(1e9 / rate)` ns
    pub fn from_sample_rate(rate_hz: f64) -> Result<Self> {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(ConvertError::InvalidSampleRate(format!(
                "{} (must be a positive number of Hz)",
                rate_hz
            )));
        }

        let nanoseconds = (1e9 / rate_hz).round();
        if nanoseconds < 1.0 {
            return Err(ConvertError::InvalidSampleRate(format!(
                "{} Hz is faster than 1ns resolution",
                rate_hz
            )));
        }

        Ok(Self {
            nanoseconds: nanoseconds as u64,
        })
    }

    /// Parse a user-supplied sample rate string (e.g. from a prompt)
    pub fn parse_sample_rate(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let rate: f64 = trimmed.parse().map_err(|_| {
            ConvertError::InvalidSampleRate(format!("'{}' is not a number", trimmed))
        })?;
        Self::from_sample_rate(rate)
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self { nanoseconds: 1 }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.nanoseconds)
    }
}

/// Summary of a finished conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Number of declared signals
    pub signals: usize,
    /// Data rows read, including the initial row
    pub rows: usize,
    /// `#<timestamp>` blocks written after the initial block
    pub change_blocks: usize,
    /// Rows dropped under the lenient row policy
    pub skipped_rows: usize,
}
