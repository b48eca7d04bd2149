//! File logging for Memopad hosts.
//!
//! # Responsibility
//! - Turn the `MEMOPAD_LOG_*` settings of an `AppConfig` into one rolling
//!   file logger per process, or none when no log directory is configured.
//! - Route panics through the log before the default hook runs.
//!
//! # Invariants
//! - Events are metadata-only; note titles and content never reach the log.
//! - A second init with the same settings is a no-op; different settings are
//!   rejected.
//! - Initialization never panics.

use crate::config::AppConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "memopad";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Severity threshold accepted by `MEMOPAD_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `Debug` for debug builds, `Info` for release builds.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }

    /// Parses a level name, case-insensitively; `warning` is accepted.
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unsupported log level `{other}`; expected trace|debug|info|warn|error"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `init_logging` left running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingOutcome {
    /// No log directory configured; nothing was started.
    Disabled,
    /// File logging is active at `log_dir`.
    Active { level: LogLevel, log_dir: PathBuf },
}

struct ActiveLogger {
    level: LogLevel,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

impl ActiveLogger {
    fn accepts(&self, level: LogLevel, log_dir: &Path) -> Result<(), String> {
        if self.log_dir != log_dir {
            return Err(format!(
                "logging already writes to `{}`; refusing to switch to `{}`",
                self.log_dir.display(),
                log_dir.display()
            ));
        }
        if self.level != level {
            return Err(format!(
                "logging already runs at level `{}`; refusing to switch to `{level}`",
                self.level
            ));
        }
        Ok(())
    }
}

/// Starts file logging as configured by `config`.
///
/// Relative log directories resolve against the current working directory.
///
/// # Errors
/// - Unsupported `log_level`.
/// - Log directory cannot be resolved or created, or the backend fails.
/// - Logging is already active with a different level or directory.
pub fn init_logging(config: &AppConfig) -> Result<LoggingOutcome, String> {
    let Some(raw_dir) = config.log_dir.as_deref() else {
        return Ok(LoggingOutcome::Disabled);
    };
    let level = LogLevel::parse(&config.log_level)?;
    let log_dir = resolve_log_dir(raw_dir)?;

    ACTIVE_LOGGER
        .get_or_try_init(|| start_file_logger(level, &log_dir))?
        .accepts(level, &log_dir)?;
    Ok(LoggingOutcome::Active { level, log_dir })
}

fn start_file_logger(level: LogLevel, log_dir: &Path) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", log_dir.display()))?;

    // Direct writes: CLI processes exit before a buffered flush would run.
    let handle = Logger::try_with_str(level.as_str())
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::Direct)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start file logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=logging_init module=logging status=ok version={} platform={} debug_build={} level={level} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        cfg!(debug_assertions),
        log_dir.display()
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

fn resolve_log_dir(raw: &str) -> Result<PathBuf, String> {
    let path = Path::new(raw.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory cannot be empty".to_string());
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("cannot resolve log directory `{}`: {err}", path.display()))
}

fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info.location().map_or_else(
                || "unknown".to_string(),
                |loc| format!("{}:{}", loc.file(), loc.line()),
            );
            error!(
                "event=panic_captured module=logging status=error location={location} payload={}",
                panic_summary(info.payload())
            );
            previous(info);
        }));
    });
}

fn panic_summary(payload: &(dyn Any + Send)) -> String {
    let text = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    one_line(text, MAX_PANIC_PAYLOAD_CHARS)
}

/// Flattens line breaks and caps length; panic payloads may quote note text.
fn one_line(text: &str, max_chars: usize) -> String {
    let mut line: String = text
        .chars()
        .take(max_chars)
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect();
    if text.chars().nth(max_chars).is_some() {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{init_logging, one_line, panic_summary, resolve_log_dir, LogLevel, LoggingOutcome};
    use crate::config::{AppConfig, LOG_DIR_ENV, LOG_LEVEL_ENV};

    fn config(level: &str, log_dir: Option<&str>) -> AppConfig {
        AppConfig::from_lookup(|name| match name {
            LOG_LEVEL_ENV => Some(level.to_string()),
            LOG_DIR_ENV => log_dir.map(str::to_string),
            _ => None,
        })
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(LogLevel::parse("INFO").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse(" warning ").unwrap(), LogLevel::Warn);
        assert!(LogLevel::parse("verbose").is_err());
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn missing_log_dir_leaves_logging_disabled() {
        let outcome = init_logging(&config("info", None)).unwrap();
        assert_eq!(outcome, LoggingOutcome::Disabled);
    }

    #[test]
    fn relative_log_dir_resolves_against_working_directory() {
        let resolved = resolve_log_dir("logs/dev").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logs/dev"));
        assert!(resolve_log_dir("  ").is_err());
    }

    #[test]
    fn panic_payloads_are_flattened_and_capped() {
        assert_eq!(one_line("title\nbody\rmore", 8), "title bo...");
        assert_eq!(one_line("short", 8), "short");

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("a\nb"));
        assert_eq!(panic_summary(owned.as_ref()), "a b");
        let opaque: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_summary(opaque.as_ref()), "non-string panic payload");
    }

    #[test]
    fn init_is_idempotent_and_rejects_reconfiguration() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let first_dir = first.path().to_str().unwrap();
        let second_dir = second.path().to_str().unwrap();

        let outcome = init_logging(&config("info", Some(first_dir))).unwrap();
        assert_eq!(
            outcome,
            LoggingOutcome::Active {
                level: LogLevel::Info,
                log_dir: first.path().to_path_buf(),
            }
        );
        init_logging(&config(" INFO ", Some(first_dir))).expect("same settings are a no-op");

        let level_error = init_logging(&config("debug", Some(first_dir))).unwrap_err();
        assert!(level_error.contains("refusing to switch"));
        let dir_error = init_logging(&config("info", Some(second_dir))).unwrap_err();
        assert!(dir_error.contains("refusing to switch"));
    }
}
