//! Logging setup for Quill with file output and optional stderr.
//!
//! Logs always go to a file at `warn` level (or higher if `QUILL_LOG` is set).
//! Stderr logging is enabled when `QUILL_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`QUILL_LOG`** (highest priority) - Quill-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for quill crates
//!
//! ```bash
//! # Debug level for all quill crates
//! QUILL_LOG=debug quill stats notes.txt
//!
//! # Checkpoint decisions only
//! QUILL_LOG=quill_core::history=debug quill run notes.txt edits.qs
//! ```
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/quill/logs/quill-<pid>.log`
//! - macOS: `~/Library/Application Support/quill/logs/quill-12345.log`
//! - Linux: `~/.local/share/quill/logs/quill-12345.log`
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

const CRATES: &[&str] = &["quill", "quill_core", "quill_bin", "quill_log"];

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
/// Respects the priority described in the module docs:
/// `QUILL_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = create_file_filter();
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter);

    let stderr_enabled = env_is_set() || cfg!(debug_assertions);

    // stdout is reserved for command output, so the console layer writes to stderr
    let stderr_layer = if stderr_enabled {
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
        .with(stderr_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Writes through the test harness's captured output (no file output). Will not crash if called multiple times or if
/// logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn env_is_set() -> bool {
    env::var("QUILL_LOG").is_ok() || env::var("RUST_LOG").is_ok()
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("quill-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
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
        .join("quill")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env_is_set() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Implements the priority system: `QUILL_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    if let Ok(quill_log) = env::var("QUILL_LOG") {
        return expand_quill_log(&quill_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(directives("info"))
}

/// Expand `QUILL_LOG` values into full tracing filter strings.
///
/// - `QUILL_LOG=debug` becomes `warn,quill=debug,quill_core=debug,...`
/// - `QUILL_LOG=quill_core=trace` is used as-is (advanced syntax)
fn expand_quill_log(quill_log: &str) -> EnvFilter {
    if is_advanced(quill_log) {
        return EnvFilter::new(quill_log);
    }
    EnvFilter::new(directives(quill_log))
}

fn is_advanced(value: &str) -> bool {
    value.contains('=') || value.contains(':') || value.contains(',')
}

fn directives(level: &str) -> String {
    let mut out = String::from("warn");
    for name in CRATES {
        out.push_str(&format!(",{name}={level}"));
    }
    out
}
