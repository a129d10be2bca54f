//! Main converter API
//!
//! This module provides the primary interface for the library. The Converter
//! struct owns a configuration and runs stream- or file-level conversions.

use crate::config::ConvertConfig;
use crate::formats::render_change_block;
use crate::transcoder::Transcoder;
use crate::types::{ConversionStats, ConvertError, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Default output path: the input path with a `.vcd` extension
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("vcd")
}

/// `$scope module` name for an input file: its name without extension
pub fn module_name_for(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("top")
        .to_string()
}

/// The converter - entry point for all conversions
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Create a converter with the given configuration
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert CSV text from `input` into VCD text on `output`
    ///
    /// Nothing is written when the header or the first data row fail.
    ///
    /// # Example
    /// ```
    /// use csv_vcd_converter::{ConvertConfig, Converter};
    /// use std::io::Cursor;
    ///
    /// let converter = Converter::new(ConvertConfig::new().with_date("today"));
    /// let mut vcd = Vec::new();
    /// let stats = converter
    ///     .convert(Cursor::new("time,a\n0,0\n5,1\n"), &mut vcd, "demo")
    ///     .unwrap();
    /// assert_eq!(stats.change_blocks, 1);
    /// assert!(String::from_utf8(vcd).unwrap().ends_with("#5\n1!\n"));
    /// ```
    pub fn convert<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
        module_name: &str,
    ) -> Result<ConversionStats> {
        let transcoder = Transcoder::seed(input, &self.config)?;
        self.emit(transcoder, output, module_name)
    }

    /// Convert the CSV file at `input` into the VCD file at `output`
    ///
    /// The input must be an existing regular file. An existing output must be
    /// a regular file; it is overwritten and keeps its permissions. A symlinked
    /// output is followed to the file it points at.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConversionStats> {
        log::info!("Converting {:?} -> {:?}", input, output);

        if !input.is_file() {
            return Err(ConvertError::InputNotFound(input.to_path_buf()));
        }
        if output.exists() && !output.is_file() {
            return Err(ConvertError::OutputPathInvalid(output.to_path_buf()));
        }

        let module_name = match &self.config.module_name {
            Some(name) => name.clone(),
            None => module_name_for(input),
        };

        let reader = BufReader::new(File::open(input)?);
        let transcoder = Transcoder::seed(reader, &self.config)?;

        let stats = if self.config.atomic_output {
            // Replace the file a symlink points at, not the link
            let target = if output.exists() {
                fs::canonicalize(output)?
            } else {
                output.to_path_buf()
            };
            let dir = match target.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut staged = stage_file(dir, &target)?;
            log::debug!("Staging output in {:?}", staged.path());

            let stats = self.emit(transcoder, BufWriter::new(staged.as_file_mut()), &module_name)?;
            staged
                .persist(&target)
                .map_err(|e| ConvertError::IoError(e.error))?;
            stats
        } else {
            let file = File::create(output)?;
            self.emit(transcoder, BufWriter::new(file), &module_name)?
        };

        log::info!(
            "Wrote {} change blocks for {} signals ({} rows) to {:?}",
            stats.change_blocks,
            stats.signals,
            stats.rows,
            output
        );
        Ok(stats)
    }

    /// Write the header block, then one block per change set
    fn emit<R: BufRead, W: Write>(
        &self,
        mut transcoder: Transcoder<R>,
        mut output: W,
        module_name: &str,
    ) -> Result<ConversionStats> {
        let date = self.config.date_text();
        let header = transcoder.header_block(&date, self.config.time_unit, module_name);
        output.write_all(header.as_bytes())?;

        for changes in transcoder.by_ref() {
            output.write_all(render_change_block(&changes?).as_bytes())?;
        }
        output.flush()?;

        Ok(transcoder.stats().clone())
    }
}

/// Temporary file in `dir` with the permissions `target` should end up with
///
/// An existing target keeps its mode. A new one gets what `File::create`
/// would give it (0o666 less the umask).
fn stage_file(dir: &Path, target: &Path) -> Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let staged = builder.tempfile_in(dir)?;

    if let Ok(metadata) = fs::metadata(target) {
        staged.as_file().set_permissions(metadata.permissions())?;
    }
    Ok(staged)
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertConfig::default())
    }
}
