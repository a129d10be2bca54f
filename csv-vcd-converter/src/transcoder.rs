//! Change-detection scan
//!
//! The transcoder reads the header and the first data row (the initial
//! state), then walks the remaining rows and yields a `ChangeSet` only for rows
//! where at least one signal differs from the row before it.

use crate::config::{ConvertConfig, RowPolicy};
use crate::formats::{render_header, CsvReader, SampleReader};
use crate::signals::SignalTable;
use crate::types::{ChangeSet, ConversionStats, ConvertError, Result, Sample, TimeUnit};
use std::io::BufRead;

/// Lifecycle of one transcoder; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscoderState {
    /// Header and initial row read, no change rows consumed yet
    Seeded,
    /// Consuming change rows
    Scanning,
    /// Input exhausted or a fatal error was returned
    Done,
}

/// Compare two samples signal by signal
///
/// Every signal is checked; the result lists changed signals in table order.
pub fn diff_samples(signals: &SignalTable, previous: &Sample, current: &Sample) -> ChangeSet {
    let changes = signals
        .iter()
        .zip(previous.values.iter().zip(&current.values))
        .filter(|(_, (old, new))| old != new)
        .map(|(signal, (_, new))| (signal.symbol, *new))
        .collect();

    ChangeSet {
        timestamp: current.timestamp,
        changes,
    }
}

/// Iterator over the non-empty change sets of a CSV input
pub struct Transcoder<R> {
    samples: SampleReader<R>,
    signals: SignalTable,
    initial: Sample,
    previous: Sample,
    row_policy: RowPolicy,
    state: TranscoderState,
    stats: ConversionStats,
}

impl<R: BufRead> Transcoder<R> {
    /// Read the header and the initial row
    ///
    /// Fails before anything could be written when the header has more
    /// signals than available symbols, or when the first row is missing or
    /// malformed.
    pub fn seed(input: R, config: &ConvertConfig) -> Result<Self> {
        let (names, mut samples) = CsvReader::new(input).read_header(config.value_policy)?;
        let signals = SignalTable::allocate(names)?;
        log::info!("Declared {} signals", signals.len());

        let initial = match samples.next() {
            Some(sample) => sample?,
            None => return Err(ConvertError::EmptyInput("data rows")),
        };
        log::debug!("Initial state from line {}: {:?}", initial.line, initial.values);

        Ok(Self {
            samples,
            previous: initial.clone(),
            initial,
            stats: ConversionStats {
                signals: signals.len(),
                rows: 1,
                ..Default::default()
            },
            signals,
            row_policy: config.row_policy,
            state: TranscoderState::Seeded,
        })
    }

    /// Text of the header and initial `$dumpvars` block
    pub fn header_block(&self, date: &str, time_unit: TimeUnit, module_name: &str) -> String {
        render_header(date, time_unit, module_name, &self.signals, &self.initial)
    }

    pub fn signals(&self) -> &SignalTable {
        &self.signals
    }

    pub fn state(&self) -> TranscoderState {
        self.state
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }
}

impl<R: BufRead> Iterator for Transcoder<R> {
    type Item = Result<ChangeSet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == TranscoderState::Done {
            return None;
        }
        self.state = TranscoderState::Scanning;

        loop {
            let current = match self.samples.next() {
                Some(Ok(sample)) => sample,
                Some(Err(e)) if self.row_policy == RowPolicy::SkipMalformed && is_row_error(&e) => {
                    log::warn!("Skipping row: {}", e);
                    self.stats.skipped_rows += 1;
                    continue;
                }
                Some(Err(e)) => {
                    self.state = TranscoderState::Done;
                    return Some(Err(e));
                }
                None => {
                    self.state = TranscoderState::Done;
                    return None;
                }
            };
            self.stats.rows += 1;

            let changes = diff_samples(&self.signals, &self.previous, &current);
            self.previous = current;

            if !changes.is_empty() {
                log::trace!("#{}: {} changes", changes.timestamp, changes.len());
                self.stats.change_blocks += 1;
                return Some(Ok(changes));
            }
        }
    }
}

/// Errors confined to a single row (as opposed to I/O failures)
fn is_row_error(error: &ConvertError) -> bool {
    matches!(
        error,
        ConvertError::MalformedRow { .. } | ConvertError::MalformedSample { .. }
    )
}
