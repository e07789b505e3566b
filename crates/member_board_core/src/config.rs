//! Session configuration resolved from environment and arguments.
//!
//! # Invariants
//! - Resolution never fails; unusable values surface later, at
//!   `init_logging` time.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "MEMBER_BOARD_LOG_LEVEL";
/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "MEMBER_BOARD_LOG_DIR";
/// Argument requesting demo data at startup.
pub const DEMO_FLAG: &str = "--demo";

/// Settings for one application session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub seed_demo: bool,
}

impl SessionConfig {
    /// Reads the process environment and command-line arguments.
    pub fn from_process() -> Self {
        Self::resolve(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    /// Resolves settings from an environment lookup and argument list.
    ///
    /// Blank environment values fall back to defaults.
    pub fn resolve<E, A, S>(env: E, args: A) -> Self
    where
        E: Fn(&str) -> Option<String>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let non_blank = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let log_level = non_blank(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = non_blank(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);
        let seed_demo = args.into_iter().any(|arg| arg.as_ref() == DEMO_FLAG);

        Self {
            log_level,
            log_dir,
            seed_demo,
        }
    }
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("member_board").join("logs")
}
