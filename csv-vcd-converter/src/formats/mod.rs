//! Input and output formats (CSV in, VCD out)
//!
//! The CSV side is a lazy, forward-only reader; the VCD side is a set of pure
//! rendering functions.

pub mod csv;
pub mod vcd;

// Re-export the pieces the transcoder drives
pub use csv::{parse_header, parse_row, CsvReader, SampleReader};
pub use vcd::{render_change_block, render_header, VERSION_TEXT};
