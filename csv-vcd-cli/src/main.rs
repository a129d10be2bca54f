//! CSV to VCD Converter CLI
//!
//! Command-line front end for the csv-vcd-converter library. It adds:
//! - Argument parsing and an optional TOML configuration file
//! - The interactive sample-rate prompt
//! - Logging setup
//! - A summary report (TXT/JSON) after a successful conversion

use anyhow::{Context, Result};
use clap::Parser;
use csv_vcd_converter::{
    default_output_path, ConvertConfig, ConvertError, Converter, RowPolicy, TimeUnit, ValuePolicy,
};
use std::io;
use std::path::PathBuf;

mod config;
mod prompt;
mod report;

use config::{AppConfig, ReportFormat};

/// Convert a CSV file of digital samples into a VCD waveform
#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(about = "Convert CSV signal samples into a Value Change Dump (VCD)", long_about = None)]
#[command(version)]
struct Args {
    /// CSV file: header `time,sig0,sig1,...` then `timestamp,0/1,...` rows
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// VCD file to write (default: INPUT with a .vcd extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Sample rate in Hz (prompted on stdin when not given here or in the config)
    #[arg(short, long, value_name = "HZ")]
    rate: Option<f64>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on signal values other than 0 and 1
    #[arg(long)]
    reject_non_binary: bool,

    /// Skip malformed rows instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Write the output file incrementally instead of replacing it on success
    #[arg(long)]
    no_atomic: bool,

    /// Summary format printed after conversion
    #[arg(long, value_enum)]
    report: Option<ReportFormat>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::debug!("convert v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using converter library v{}", csv_vcd_converter::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    run(&args, &app_config)
}

/// Resolve settings, convert, and print the summary
fn run(args: &Args, app_config: &AppConfig) -> Result<()> {
    let conversion = &app_config.conversion;

    // Check paths before asking for anything interactively
    if !args.input.is_file() {
        return Err(ConvertError::InputNotFound(args.input.clone()).into());
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    if output.exists() && !output.is_file() {
        return Err(ConvertError::OutputPathInvalid(output).into());
    }

    let time_unit = match args.rate.or(conversion.sample_rate) {
        Some(rate) => TimeUnit::from_sample_rate(rate)?,
        None => prompt::prompt_time_unit(io::stdin().lock(), io::stdout())?,
    };
    log::info!("Timescale: {}", time_unit);

    let value_policy = if args.reject_non_binary || conversion.reject_non_binary {
        ValuePolicy::RejectNonBinary
    } else {
        ValuePolicy::PassThrough
    };
    let row_policy = if args.skip_malformed || conversion.skip_malformed_rows {
        RowPolicy::SkipMalformed
    } else {
        RowPolicy::FailFast
    };

    let config = ConvertConfig::new()
        .with_time_unit(time_unit)
        .with_value_policy(value_policy)
        .with_row_policy(row_policy)
        .with_atomic_output(conversion.atomic_output && !args.no_atomic);

    let stats = Converter::new(config)
        .convert_file(&args.input, &output)
        .with_context(|| format!("Failed to convert {:?}", args.input))?;

    if !args.quiet {
        let format = args.report.unwrap_or(app_config.report.format);
        let summary = report::render(format, &output, &time_unit.to_string(), &stats)?;
        println!("{}", summary.trim_end());
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
