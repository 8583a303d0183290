//! Event severity levels.
//!
//! Levels carry the integer ranks used by rule level sets. Lower ranks are more
//! severe: `FATAL` is 100, `TRACE` is 600. `OFF` and `ALL` sit at the two ends
//! of the scale.

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log event.
///
/// Ordering follows the integer rank, so `Level::Fatal < Level::Error`.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::Level;
///
/// let level: Level = "warn".parse().unwrap();
/// assert_eq!(level, Level::Warn);
/// assert_eq!(level.int_level(), 300);
/// assert!("VERBOSE".parse::<Level>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Off,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    All,
}

impl Level {
    pub const ALL_LEVELS: [Level; 8] = [
        Level::Off,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
        Level::All,
    ];

    /// Integer rank of this level.
    pub const fn int_level(self) -> i32 {
        match self {
            Level::Off => 0,
            Level::Fatal => 100,
            Level::Error => 200,
            Level::Warn => 300,
            Level::Info => 400,
            Level::Debug => 500,
            Level::Trace => 600,
            Level::All => i32::MAX,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Off => "OFF",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
            Level::All => "ALL",
        }
    }

    /// Look up a level by name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Level> {
        let name = name.trim();
        Self::ALL_LEVELS
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

impl FromStr for Level {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_name(s).ok_or_else(|| RuleError::UnknownLevel(s.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_levels_are_ordered() {
        let ranks: Vec<i32> = Level::ALL_LEVELS.iter().map(|l| l.int_level()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
        assert!(Level::Fatal < Level::Error);
        assert!(Level::Warn < Level::Info);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!("ERROR".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("error".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("  Debug ".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("all".parse::<Level>().unwrap(), Level::All);
    }

    #[test]
    fn test_unknown_level() {
        match "WARNING".parse::<Level>() {
            Err(RuleError::UnknownLevel(name)) => assert_eq!(name, "WARNING"),
            other => panic!("Expected UnknownLevel, got {other:?}"),
        }
        assert!(Level::from_name("").is_none());
    }

    #[test]
    fn test_display_round_trips_through_name() {
        for level in Level::ALL_LEVELS {
            assert_eq!(Level::from_name(&level.to_string()), Some(level));
        }
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let yaml = serde_yaml::to_string(&Level::Warn).unwrap();
        assert_eq!(yaml.trim(), "WARN");
        let level: Level = serde_yaml::from_str("FATAL").unwrap();
        assert_eq!(level, Level::Fatal);
    }
}
