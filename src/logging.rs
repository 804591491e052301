//! Leveled console logging.
//!
//! The verbosity count from the command line selects a [`LogLevel`]. Error
//! events always reach standard error; every other event goes to standard
//! output once the threshold admits it. `RUST_LOG` overrides the threshold.

use std::io::IsTerminal;
use strum::{Display, EnumIter, EnumString};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

/// Logging threshold, ordered by increasing verbosity.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    #[default]
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Map the number of `-v` flags to a threshold. Anything above three is debug.
    pub fn from_verbosity(count: u8) -> LogLevel {
        match count {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }

    fn directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.level_filter()
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "error,{}={}",
            env!("CARGO_CRATE_NAME"),
            level.directive()
        ))
    });

    let writer = std::io::stderr
        .with_max_level(Level::ERROR)
        .or_else(std::io::stdout);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
        assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
        assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
        assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(9), LogLevel::Debug);
        assert_eq!(LogLevel::default(), LogLevel::from_verbosity(0));
    }

    #[test]
    fn test_levels_are_ordered_by_verbosity() {
        let levels: Vec<LogLevel> = LogLevel::iter().collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
        assert!(LogLevel::Error < LogLevel::Debug);
    }

    #[test]
    fn test_level_filter_admits_errors_at_every_level() {
        for level in LogLevel::iter() {
            assert!(level.level_filter() >= LevelFilter::ERROR);
        }
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_level_names() {
        assert_eq!(LogLevel::from_str("WARNING").unwrap(), LogLevel::Warning);
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert!(LogLevel::from_str("trace").is_err());
    }
}
