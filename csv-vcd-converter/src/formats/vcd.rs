//! VCD text rendering
//!
//! Pure formatting: every function returns the text of one VCD section and
//! performs no I/O. Values are written as `<value><symbol>` with no separator,
//! one per line.

use crate::signals::SignalTable;
use crate::types::{ChangeSet, Sample, TimeUnit};
use std::fmt::Write;

/// Text of the `$version` block
pub const VERSION_TEXT: &str = "csv-vcd-converter";

/// Render everything up to and including the initial `$dumpvars` block
///
/// # Arguments
/// * `date` - Text for the `$date` block
/// * `time_unit` - Unit for the `$timescale` block
/// * `module_name` - Name of the single `$scope module`
/// * `signals` - Declared signals, in column order
/// * `initial` - First data row; its values become the `#0` state
pub fn render_header(
    date: &str,
    time_unit: TimeUnit,
    module_name: &str,
    signals: &SignalTable,
    initial: &Sample,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "$date\n    {}\n$end", date);
    let _ = writeln!(out, "$version\n    {}\n$end", VERSION_TEXT);
    let _ = writeln!(out, "$timescale\n    {}\n$end", time_unit);
    let _ = writeln!(out, "$scope module {} $end", module_name);
    for signal in signals {
        let _ = writeln!(out, "$var wire 1 {} {} $end", signal.symbol, signal.name);
    }
    let _ = writeln!(out, "$upscope $end");
    let _ = writeln!(out, "$enddefinitions $end");

    let _ = writeln!(out, "$dumpvars");
    let _ = writeln!(out, "#0");
    for (signal, value) in signals.iter().zip(&initial.values) {
        let _ = writeln!(out, "{}{}", value, signal.symbol);
    }
    let _ = writeln!(out, "$end");

    out
}

/// Render one `#<timestamp>` block with its value lines
pub fn render_change_block(changes: &ChangeSet) -> String {
    let mut out = format!("#{}\n", changes.timestamp);
    for (symbol, value) in &changes.changes {
        let _ = writeln!(out, "{}{}", value, symbol);
    }
    out
}
