//! Stderr logging for the `consensus` binary and examples.
//!
//! Lines look like `[  0.012s DEBUG consensus_text] message`: time since the
//! logger was installed, level, and the crate that emitted the record.
//! `CONSENSUS_LOG` (`error`, `warn`, `info`, `debug`, `trace`, `off`)
//! overrides the level passed to [`init_with_level`].

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use log::{Level, LevelFilter, Log, Metadata, Record};

const LEVEL_ENV: &str = "CONSENSUS_LOG";

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// One log line, newline included. Module paths are cut to their crate.
fn format_line(elapsed: Duration, level: Level, target: &str, args: &fmt::Arguments) -> String {
    let krate = target.split("::").next().unwrap_or(target);
    format!(
        "[{:7.3}s {:>5} {krate}] {args}\n",
        elapsed.as_secs_f64(),
        level
    )
}

fn level_from_env(fallback: LevelFilter) -> LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(fallback)
}

/// Install the stderr logger at `level`, unless `CONSENSUS_LOG` names
/// another one.
///
/// Calling this again after a successful install does nothing.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let level = level_from_env(level);
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber on stderr.
///
/// `RUST_LOG` directives win over `level`. With `json` each event is one
/// flattened JSON object per line. `log` records are bridged by the
/// subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing(
    level: LevelFilter,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::filter::LevelFilter as TraceLevel;
    use tracing_subscriber::EnvFilter;

    let default = match level {
        LevelFilter::Off => TraceLevel::OFF,
        LevelFilter::Error => TraceLevel::ERROR,
        LevelFilter::Warn => TraceLevel::WARN,
        LevelFilter::Info => TraceLevel::INFO,
        LevelFilter::Debug => TraceLevel::DEBUG,
        LevelFilter::Trace => TraceLevel::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    }
}
