//! Logging setup for Plume with file output and optional console output.
//!
//! Logs always go to a file at `warn` level (or lower if `PLUME_LOG` is set).
//! Console logging goes to stderr, leaving stdout to command output. It is enabled
//! when `PLUME_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`PLUME_LOG`** (highest priority) - Plume-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for plume crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/plume/logs/plume-<pid>.log`
//! - macOS: `~/Library/Application Support/plume/logs/plume-12345.log`
//! - Linux: `~/.local/share/plume/logs/plume-12345.log`
//!
//! Override with `--log-file <path>`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Crates that `PLUME_LOG=<level>` applies to.
const PLUME_CRATES: &[&str] = &["plume_text", "plume_bin", "plume_log"];

pub type LogResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// This function respects the environment variable priority described in the module docs:
/// [`PLUME_LOG`] > [`RUST_LOG`] > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
///
/// [`PLUME_LOG`]: crate#environment-variables
/// [`RUST_LOG`]: crate#environment-variables
pub fn init(config: LogConfig) -> LogResult<LogGuard> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let console_enabled =
        env::var("PLUME_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let console_layer = if console_enabled {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(create_filter()),
        )
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Console only (no file output), captured by the test harness. Will not crash if
/// called multiple times or if logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

/// Split the configured log path into a directory and file name.
///
/// A path with an extension is a file; anything else is a directory that gets the
/// default per-process file name.
fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("plume-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plume")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("PLUME_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Create the appropriate [`EnvFilter`] based on environment variables.
fn create_filter() -> EnvFilter {
    if let Ok(plume_log) = env::var("PLUME_LOG") {
        return expand_plume_log(&plume_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    expand_plume_log("info")
}

/// Expand `PLUME_LOG` values into full tracing filter strings.
///
/// - `PLUME_LOG=debug` becomes `warn,plume_text=debug,plume_bin=debug,...`
/// - `PLUME_LOG=plume_text=trace,plume_bin=debug` is used as-is
fn expand_plume_log(plume_log: &str) -> EnvFilter {
    EnvFilter::new(filter_directives(plume_log))
}

fn filter_directives(plume_log: &str) -> String {
    if plume_log.contains('=') || plume_log.contains(':') || plume_log.contains(',') {
        return plume_log.to_string();
    }

    let mut directives = String::from("warn");
    for name in PLUME_CRATES {
        directives.push_str(&format!(",{name}={plume_log}"));
    }
    directives
}
