//! Post-conversion summary (TXT or JSON)

use crate::config::ReportFormat;
use anyhow::Result;
use csv_vcd_converter::ConversionStats;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Summary<'a> {
    output: &'a Path,
    time_unit: String,
    #[serde(flatten)]
    stats: &'a ConversionStats,
}

/// Render the summary of a finished conversion
pub fn render(
    format: ReportFormat,
    output: &Path,
    time_unit: &str,
    stats: &ConversionStats,
) -> Result<String> {
    match format {
        ReportFormat::Txt => {
            let mut text = format!("Wrote {}\n", output.display());
            text.push_str(&format!("  Timescale:     {}\n", time_unit));
            text.push_str(&format!("  Signals:       {}\n", stats.signals));
            text.push_str(&format!("  Rows:          {}\n", stats.rows));
            text.push_str(&format!("  Change blocks: {}\n", stats.change_blocks));
            if stats.skipped_rows > 0 {
                text.push_str(&format!("  Skipped rows:  {}\n", stats.skipped_rows));
            }
            Ok(text)
        }
        ReportFormat::Json => {
            let summary = Summary {
                output,
                time_unit: time_unit.to_string(),
                stats,
            };
            Ok(serde_json::to_string_pretty(&summary)?)
        }
    }
}
