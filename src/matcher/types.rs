//! Compiled per-dimension matchers.

use crate::level::Level;
use crate::matcher::groups::MatchGroups;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// One matchable facet of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Level,
    Message,
    Exception,
    ThreadName,
    LoggerName,
}

impl Dimension {
    /// All dimensions in evaluation order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Level,
        Dimension::Message,
        Dimension::Exception,
        Dimension::ThreadName,
        Dimension::LoggerName,
    ];

    /// Key of this dimension inside a rule's criteria.
    pub const fn config_key(self) -> &'static str {
        match self {
            Dimension::Level => "matchLevel",
            Dimension::Message => "matchMessage",
            Dimension::Exception => "matchException",
            Dimension::ThreadName => "matchThreadName",
            Dimension::LoggerName => "matchLoggerName",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// Accepted severities of a rule's level dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSet {
    severities: HashSet<i32>,
}

impl LevelSet {
    pub fn new(levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            severities: levels.into_iter().map(Level::int_level).collect(),
        }
    }

    pub fn contains(&self, level: Level) -> bool {
        self.severities.contains(&level.int_level())
    }

    pub fn len(&self) -> usize {
        self.severities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.severities.is_empty()
    }
}

/// Ordered list of compiled patterns for one text dimension.
///
/// An empty list is still a constraint: it never matches.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Try each pattern in order against `input`. The first one that matches
    /// contributes its capture groups to `groups` and ends the search.
    pub fn capture_first(&self, input: &str, groups: &mut MatchGroups) -> bool {
        self.patterns
            .iter()
            .any(|pattern| groups.capture(pattern, input))
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
