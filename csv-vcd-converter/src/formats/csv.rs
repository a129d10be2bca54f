//! CSV sample reader
//!
//! Input layout:
//!
//! ```text
//! time,clk,data      <- header: first column is a label, the rest name signals
//! 0,0,1              <- timestamp followed by one integer per signal
//! 5,1,1
//! ```
//!
//! Fields are split on `,` and trimmed. Blank lines are skipped. The reader is
//! forward-only: the header is consumed once, then samples are pulled lazily.

use crate::config::ValuePolicy;
use crate::types::{ConvertError, Result, Sample};
use std::io::{BufRead, ErrorKind, Lines};

/// Split a header line into signal names, dropping the timestamp column
pub fn parse_header(line: &str) -> Vec<String> {
    line.split(',')
        .skip(1)
        .map(|name| name.trim().to_string())
        .collect()
}

/// Parse one data row against the declared signal names
///
/// # Arguments
/// * `line` - Raw CSV line
/// * `line_no` - 1-based line number, reported in errors
/// * `names` - Signal names from the header (defines the expected width)
/// * `policy` - Whether values other than 0/1 are accepted
pub fn parse_row(line: &str, line_no: usize, names: &[String], policy: ValuePolicy) -> Result<Sample> {
    let mut fields = line.split(',').map(str::trim);

    let timestamp_field = fields.next().unwrap_or_default();
    let timestamp = timestamp_field.parse::<u64>().map_err(|_| ConvertError::MalformedRow {
        line: line_no,
        reason: format!("timestamp '{}' is not a non-negative integer", timestamp_field),
    })?;

    let fields: Vec<&str> = fields.collect();
    if fields.len() != names.len() {
        return Err(ConvertError::MalformedRow {
            line: line_no,
            reason: format!(
                "expected {} signal values, found {}",
                names.len(),
                fields.len()
            ),
        });
    }

    let mut values = Vec::with_capacity(names.len());
    for (field, name) in fields.into_iter().zip(names) {
        let value = field.parse::<i64>().map_err(|_| ConvertError::MalformedRow {
            line: line_no,
            reason: format!("value '{}' for signal '{}' is not an integer", field, name),
        })?;

        if policy == ValuePolicy::RejectNonBinary && value != 0 && value != 1 {
            return Err(ConvertError::MalformedSample {
                line: line_no,
                signal: name.clone(),
                value,
            });
        }

        values.push(value);
    }

    Ok(Sample {
        timestamp,
        values,
        line: line_no,
    })
}

/// Reader positioned before the header row
pub struct CsvReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Consume the header row
    ///
    /// Returns the signal names and a reader over the data rows that follow.
    pub fn read_header(mut self, policy: ValuePolicy) -> Result<(Vec<String>, SampleReader<R>)> {
        let (line_no, line) = match next_content_line(&mut self.lines, &mut self.line_no) {
            Some(result) => result?,
            None => return Err(ConvertError::EmptyInput("header row")),
        };

        let names = parse_header(&line);
        log::debug!("Header at line {}: {} signals", line_no, names.len());

        let samples = SampleReader {
            lines: self.lines,
            line_no: self.line_no,
            names: names.clone(),
            policy,
        };

        Ok((names, samples))
    }
}

/// Lazy iterator over the data rows of a CSV file
pub struct SampleReader<R> {
    lines: Lines<R>,
    line_no: usize,
    names: Vec<String>,
    policy: ValuePolicy,
}

impl<R: BufRead> Iterator for SampleReader<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        let (line_no, line) = match next_content_line(&mut self.lines, &mut self.line_no)? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e)),
        };
        Some(parse_row(&line, line_no, &self.names, self.policy))
    }
}

/// Next non-blank line with its 1-based line number
fn next_content_line<R: BufRead>(
    lines: &mut Lines<R>,
    line_no: &mut usize,
) -> Option<Result<(usize, String)>> {
    loop {
        let line = lines.next()?;
        *line_no += 1;
        match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => return Some(Ok((*line_no, line))),
            // The offending bytes are already consumed; the next call resumes
            // at the following line
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Some(Err(ConvertError::MalformedRow {
                    line: *line_no,
                    reason: "line is not valid UTF-8".to_string(),
                }))
            }
            Err(e) => return Some(Err(e.into())),
        }
    }
}
