//! Interactive sample-rate prompt

use csv_vcd_converter::{ConvertError, TimeUnit};
use std::io::{BufRead, Write};

/// Ask for a sample rate in Hz and turn it into a VCD time unit
pub fn prompt_time_unit<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<TimeUnit, ConvertError> {
    write!(output, "Sample rate (Hz): ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConvertError::InvalidSampleRate(
            "no sample rate entered".to_string(),
        ));
    }

    TimeUnit::parse_sample_rate(&line)
}
