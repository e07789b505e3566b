//! Session logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs once per process.
//! - Keep diagnostic events metadata-only: ids, counts and durations are
//!   logged, member names and introductions are not.
//!
//! # Invariants
//! - Initialization with an identical level and directory is idempotent.
//! - Initialization never panics.
//! - Switching level or directory after the first success is rejected.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "member_board";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: LevelFilter,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Errors from logging initialization.
#[derive(Debug)]
pub enum LoggingError {
    /// Level is not one of `trace|debug|info|warn|error`.
    UnsupportedLevel(String),
    /// Directory path is empty.
    EmptyDirectory,
    /// Directory is not absolute.
    RelativeDirectory(PathBuf),
    /// Directory could not be created.
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// `flexi_logger` rejected the logger spec or failed to start.
    Backend(String),
    /// Logging is already running with a different level or directory.
    Conflict { active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyDirectory => write!(f, "log_dir cannot be empty"),
            Self::RelativeDirectory(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::CreateDirectory { path, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                path.display()
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already initialized with `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Initializes session logging with a level name and an absolute directory.
///
/// Level names are matched case-insensitively; `warning` is accepted for
/// `warn` and `off` is rejected.
///
/// # Errors
/// - [`LoggingError::UnsupportedLevel`] for unknown levels.
/// - [`LoggingError::EmptyDirectory`] / [`LoggingError::RelativeDirectory`]
///   for unusable directories.
/// - [`LoggingError::Conflict`] when already running with other settings.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    if log_dir.as_os_str().is_empty() {
        return Err(LoggingError::EmptyDirectory);
    }
    if !log_dir.is_absolute() {
        return Err(LoggingError::RelativeDirectory(log_dir.to_path_buf()));
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, log_dir))?;
    if state.log_dir != log_dir {
        return Err(LoggingError::Conflict {
            active: state.log_dir.display().to_string(),
            requested: log_dir.display().to_string(),
        });
    }
    if state.level != level {
        return Err(LoggingError::Conflict {
            active: state.level.to_string(),
            requested: level.to_string(),
        });
    }
    Ok(())
}

/// Returns the level filter and directory of the active logger, if any.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// Returns `debug` for debug builds and `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    match trimmed.parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(LoggingError::UnsupportedLevel(trimmed.to_string())),
        Ok(level) => Ok(level),
    }
}

fn start_logger(level: LevelFilter, log_dir: &Path) -> Result<LoggingState, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDirectory {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let logger = Logger::with(LogSpecification::builder().default(level).build())
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
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    // Runs once: the surrounding OnceCell only stores a successful start.
    log_panics();

    info!(
        "event=logging_init module=logging status=ok level={} os={} log_dir={}",
        level,
        std::env::consts::OS,
        log_dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    })
}

/// Chains a hook that records panics as single-line events.
fn log_panics() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        let thread = std::thread::current();
        error!(
            "event=panic_captured module=logging status=error thread={} location={} payload={}",
            thread.name().unwrap_or("unnamed"),
            location,
            single_line(panic_text(panic_info.payload()), MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

fn panic_text(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}

/// Payloads may quote member text: control characters become spaces and
/// the result is capped at `max_chars`.
fn single_line(value: &str, max_chars: usize) -> String {
    let flat: String = value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, panic_text, parse_level, single_line, LoggingError};
    use log::LevelFilter;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "member-board-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn parse_level_is_case_insensitive_and_rejects_off() {
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
        assert!(matches!(
            parse_level("off"),
            Err(LoggingError::UnsupportedLevel(value)) if value == "off"
        ));
        assert!(matches!(
            parse_level("loud"),
            Err(LoggingError::UnsupportedLevel(_))
        ));
    }

    #[test]
    fn init_logging_rejects_unusable_directories() {
        assert!(matches!(
            init_logging("info", Path::new("")),
            Err(LoggingError::EmptyDirectory)
        ));
        let err = init_logging("info", Path::new("logs/dev")).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn single_line_flattens_control_characters_and_caps_length() {
        assert_eq!(single_line("Alice\nintro\ttext", 40), "Alice intro text");
        assert_eq!(single_line("abcdefghij", 4), "abcd...");
        assert_eq!(single_line("日本語テキスト", 3), "日本語...");
    }

    #[test]
    fn panic_text_reads_str_and_string_payloads() {
        let literal: Box<dyn std::any::Any + Send> = Box::new("boom");
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned boom"));
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_text(literal.as_ref()), "boom");
        assert_eq!(panic_text(owned.as_ref()), "owned boom");
        assert_eq!(panic_text(other.as_ref()), "<non-string payload>");
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let log_dir = unique_temp_dir("idempotent");
        let other_dir = unique_temp_dir("other");

        init_logging("info", &log_dir).unwrap();
        init_logging("INFO", &log_dir).unwrap();

        let level_err = init_logging("debug", &log_dir).unwrap_err();
        assert!(matches!(level_err, LoggingError::Conflict { .. }));

        let dir_err = init_logging("info", &other_dir).unwrap_err();
        assert!(dir_err.to_string().contains("refusing to switch"));

        let (level, dir) = logging_status().unwrap();
        assert_eq!(level, LevelFilter::Info);
        assert_eq!(dir, log_dir);
    }
}
