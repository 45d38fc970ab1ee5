use napkin_core::config::types::{LoggingConfig, ResolvedConfig};
use std::fs::{self, File};
use std::sync::Mutex;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Install the stderr logger, plus a file logger when `logging.file` is set.
/// `RUST_LOG` overrides the configured levels.
pub fn init(cfg: &ResolvedConfig) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter(&cfg.logging.level, LevelFilter::INFO));

    let file_layer = open_log_file(&cfg.logging).map(|writer| {
        let level = cfg.logging.file_level.as_deref().unwrap_or(&cfg.logging.level);
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter(level, LevelFilter::DEBUG))
    });

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
}

/// Flush the file logger; `process::exit` skips destructors.
pub fn flush() {
    if let Ok(mut g) = LOG_GUARD.lock() {
        g.take();
    }
}

fn filter(level: &str, fallback: LevelFilter) -> EnvFilter {
    let level = parse_level(level).unwrap_or(fallback);
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

/// Non-blocking writer for `logging.file`. File logging is skipped with a
/// warning when the file cannot be created.
fn open_log_file(cfg: &LoggingConfig) -> Option<NonBlocking> {
    let path = cfg.file.as_ref()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("warning: cannot create log directory {}: {e}", parent.display());
        }
    }
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: cannot create log file {}: {e}; file logging disabled", path.display());
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(file);
    if let Ok(mut g) = LOG_GUARD.lock() {
        *g = Some(guard);
    }
    Some(writer)
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}
