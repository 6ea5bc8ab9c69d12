use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use consensus::io::{load_extracts, load_json, to_json_string, write_json};
use consensus::points::{PointExtract, PointReducer, PointReducerParams};
use consensus::text::{TextExtract, TextReducer, TextReducerParams};
use consensus::ReducerOptions;
use log::{info, LevelFilter};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "consensus",
    version,
    about = "Reduce crowd-sourced annotations to consensus answers"
)]
struct Cli {
    /// Log level for messages on stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Emit JSON log lines (requires the `tracing` feature).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cluster point clicks per tool.
    Points(ReduceArgs),
    /// Rebuild lines of text from polyline transcriptions.
    Text(ReduceArgs),
}

#[derive(Debug, Args)]
struct ReduceArgs {
    /// JSON array of extracts, bare or wrapped as {"data": ...}.
    input: PathBuf,

    /// Output file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reducer option as key=value, may be repeated.
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// JSON file with reducer parameters; options are applied on top.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(cli.log_level.into(), cli.log_json)?;

    match cli.command {
        Command::Points(args) => run_points(&args),
        Command::Text(args) => run_text(&args),
    }
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    consensus::core::init_tracing(level, json)?;
    // No-op when the subscriber already bridges `log` records.
    let _ = tracing_log::LogTracer::init();
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    consensus::core::init_with_level(level).map_err(|err| err.to_string())?;
    if json {
        log::warn!("--log-json needs the `tracing` feature; using plain logs");
    }
    Ok(())
}

fn run_points(args: &ReduceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let base: PointReducerParams = match &args.config {
        Some(path) => load_json(path)?,
        None => PointReducerParams::default(),
    };
    let params = ReducerOptions::parse_pairs(&args.options)?.apply_points(base)?;
    let reducer = PointReducer::new(params)?;

    let extracts: Vec<PointExtract> = load_extracts(&args.input)?;
    let reduction = reducer.reduce(&extracts);
    info!(
        "reduced {} point extracts into {} tools",
        extracts.len(),
        reduction.tools.len()
    );
    emit(args.output.as_deref(), &reduction.to_flat_map())
}

fn run_text(args: &ReduceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let base: TextReducerParams = match &args.config {
        Some(path) => load_json(path)?,
        None => TextReducerParams::default(),
    };
    let params = ReducerOptions::parse_pairs(&args.options)?.apply_text(base)?;
    let reducer = TextReducer::new(params)?;

    let extracts: Vec<TextExtract> = load_extracts(&args.input)?;
    let reduction = reducer.reduce(&extracts);
    info!(
        "reduced {} text extracts into {} lines over {} frames",
        extracts.len(),
        reduction.line_count(),
        reduction.frames.len()
    );
    emit(args.output.as_deref(), &reduction)
}

fn emit<T: Serialize + ?Sized>(
    output: Option<&Path>,
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            write_json(path, value)?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", to_json_string(value)?),
    }
    Ok(())
}
