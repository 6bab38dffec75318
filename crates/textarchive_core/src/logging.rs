//! Process logging bootstrap.
//!
//! # Responsibility
//! - Initialize the `log` backend once per process, to stderr or to a
//!   rotating file set.
//! - Capture panics as sanitized log records.
//!
//! # Invariants
//! - Initialization is idempotent for identical arguments.
//! - Re-initialization with a different level or sink is rejected.
//! - Initialization never panics.
//! - Core log records carry metadata only, never classified text.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "textarchive";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Destination for log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Unbuffered records on standard error.
    Stderr,
    /// Size-rotated files under an absolute directory.
    Directory(PathBuf),
}

impl LogSink {
    /// Builds a directory sink, rejecting blank or relative paths.
    pub fn directory(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err("log directory cannot be empty".to_string());
        }
        if !path.is_absolute() {
            return Err(format!(
                "log directory must be absolute, got `{}`",
                path.display()
            ));
        }
        Ok(Self::Directory(path.to_path_buf()))
    }

    fn describe(&self) -> String {
        match self {
            Self::Stderr => "stderr".to_string(),
            Self::Directory(dir) => dir.display().to_string(),
        }
    }
}

struct ActiveLogging {
    level: &'static str,
    sink: LogSink,
    _handle: LoggerHandle,
}

/// Starts logging at `level` into `sink`.
///
/// # Errors
/// - Unsupported `level`.
/// - Logging already active with another level or sink.
/// - Log directory cannot be created, or the backend fails to start.
pub fn init_logging(level: &str, sink: LogSink) -> Result<(), String> {
    let level = parse_level(level)?;

    if let Some(active) = ACTIVE.get() {
        return check_same(active, level, &sink);
    }

    let active = ACTIVE.get_or_try_init(|| start_backend(level, sink.clone()))?;
    check_same(active, level, &sink)
}

/// Returns `(level, sink)` of active logging, if any.
pub fn logging_status() -> Option<(&'static str, LogSink)> {
    ACTIVE.get().map(|active| (active.level, active.sink.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_backend(level: &'static str, sink: LogSink) -> Result<ActiveLogging, String> {
    let logger =
        Logger::try_with_str(level).map_err(|err| format!("invalid log level `{level}`: {err}"))?;

    let logger = match &sink {
        LogSink::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        LogSink::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
    };

    let handle = logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={} sink={} version={}",
        level,
        sink.describe(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        level,
        sink,
        _handle: handle,
    })
}

fn check_same(active: &ActiveLogging, level: &str, sink: &LogSink) -> Result<(), String> {
    if active.sink != *sink {
        return Err(format!(
            "logging already active on `{}`; refusing to switch to `{}`",
            active.sink.describe(),
            sink.describe()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already active at `{}`; refusing to switch to `{level}`",
            active.level
        ));
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            sanitize(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous(info);
    }));
}

fn sanitize(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut capped: String = flattened.chars().take(max_chars).collect();
    if flattened.chars().count() > max_chars {
        capped.push_str("...");
    }
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, parse_level, sanitize, LogSink};

    #[test]
    fn parse_level_accepts_aliases_and_rejects_unknown() {
        assert_eq!(parse_level(" WARNING ").unwrap(), "warn");
        assert_eq!(parse_level("Trace").unwrap(), "trace");
        assert!(parse_level("verbose").unwrap_err().contains("unsupported"));
    }

    #[test]
    fn directory_sink_requires_absolute_path() {
        assert!(LogSink::directory("logs/dev")
            .unwrap_err()
            .contains("absolute"));
        assert!(LogSink::directory("").is_err());
    }

    #[test]
    fn sanitize_flattens_and_caps() {
        let cleaned = sanitize("a\nb\rc-long-tail", 5);
        assert_eq!(cleaned, "a b c...");
    }

    #[test]
    fn init_is_idempotent_and_rejects_reconfiguration() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let sink = LogSink::directory(dir.path()).expect("temp dir is absolute");

        init_logging("info", sink.clone()).expect("first init should succeed");
        init_logging("INFO", sink.clone()).expect("same config should be idempotent");

        let level_err = init_logging("debug", sink.clone()).expect_err("level switch must fail");
        assert!(level_err.contains("refusing to switch"));
        let sink_err = init_logging("info", LogSink::Stderr).expect_err("sink switch must fail");
        assert!(sink_err.contains("refusing to switch"));

        assert_eq!(logging_status(), Some(("info", sink)));
    }
}
