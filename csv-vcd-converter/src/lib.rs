//! CSV to VCD Converter Library
//!
//! Converts CSV files of periodic single-bit samples into Value Change Dump
//! (VCD) traces for digital waveform viewers.
//!
//! # Architecture
//!
//! - `signals`: assigns each signal a one-character VCD identifier
//! - `formats::csv`: parses the header and lazily yields one sample per row
//! - `formats::vcd`: renders the header block and change blocks as text
//! - `transcoder`: diffs each row against the previous one and yields only
//!   the rows where something changed
//! - `converter`: ties the pieces to files and writers
//!
//! The library does NOT prompt for input, parse command lines or set up
//! logging. That is the job of the application layer (csv-vcd-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use csv_vcd_converter::{ConvertConfig, Converter, TimeUnit};
//! use std::path::Path;
//!
//! let config = ConvertConfig::new()
//!     .with_time_unit(TimeUnit::from_sample_rate(1_000_000.0).unwrap());
//!
//! let input = Path::new("capture.csv");
//! let output = csv_vcd_converter::default_output_path(input);
//! let stats = Converter::new(config).convert_file(input, &output).unwrap();
//! println!("{} change blocks written", stats.change_blocks);
//! ```

// Public modules
pub mod config;
pub mod converter;
pub mod formats;
pub mod signals;
pub mod transcoder;
pub mod types;

// Re-export main types for convenience
pub use config::{ConvertConfig, RowPolicy, ValuePolicy};
pub use converter::{default_output_path, module_name_for, Converter};
pub use signals::{Signal, SignalTable, SYMBOL_POOL_SIZE};
pub use transcoder::{Transcoder, TranscoderState};
pub use types::{ChangeSet, ConversionStats, ConvertError, Result, Sample, TimeUnit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
