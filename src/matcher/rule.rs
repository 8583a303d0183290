//! Compiled rule and its evaluation against events.

use crate::config::{join_path, CompileOptions, ConfigNode};
use crate::error::{Result, RuleError};
use crate::event::{ExceptionInfo, LogEvent};
use crate::level::Level;
use crate::matcher::compile::{compile_levels, compile_patterns};
use crate::matcher::groups::MatchGroups;
use crate::matcher::types::{Dimension, LevelSet, PatternList};
use crate::parts::PartRegistry;
use std::fmt;
use tracing::{debug, warn};

/// One rule, compiled from its criteria.
///
/// Each dimension is either absent (`None`, never filters) or a constraint the
/// event has to satisfy. All constrained dimensions must pass for the rule to
/// match. A `RuleMatcher` is immutable once built and can be shared freely
/// between threads.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::{Level, LogEvent, PartRegistry, RuleMatcher, YamlDocument};
///
/// let doc = YamlDocument::parse(
///     r#"
/// parts:
///   id: "[0-9]+"
/// rules:
///   lookup:
///     matchLevel: [ERROR]
///     matchMessage: ["user-{id} not found"]
/// "#,
/// )
/// .unwrap();
///
/// let parts = PartRegistry::from_config(&doc.node("parts").unwrap()).unwrap();
/// let rule = RuleMatcher::new(&doc.node("rules.lookup").unwrap(), &parts).unwrap();
///
/// let event = LogEvent::new(Level::Error).message("user-42 not found");
/// let groups = rule.matches_event(&event).unwrap();
/// assert_eq!(groups.get("id"), Some("42"));
///
/// assert!(rule.matches_event(&LogEvent::new(Level::Warn).message("user-42 not found")).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    path: String,
    levels: Option<LevelSet>,
    message: Option<PatternList>,
    exception: Option<PatternList>,
    thread_name: Option<PatternList>,
    logger_name: Option<PatternList>,
}

impl RuleMatcher {
    /// Compile a rule with default [`CompileOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::ConfigShape`](crate::RuleError::ConfigShape) when a
    /// criteria key holds something other than a string list. Invalid patterns
    /// and unknown level names are logged and skipped instead.
    pub fn new<N: ConfigNode>(criteria: &N, parts: &PartRegistry) -> Result<Self> {
        Self::with_options(criteria, parts, &CompileOptions::default())
    }

    pub fn with_options<N: ConfigNode>(
        criteria: &N,
        parts: &PartRegistry,
        options: &CompileOptions,
    ) -> Result<Self> {
        let path = criteria.path().to_string();
        debug!(rule = %path, "Preparing rule matcher");

        let levels = match criteria.string_list(Dimension::Level.config_key())? {
            Some(names) => {
                let (levels, failures) = compile_levels(names);
                for (name, error) in failures {
                    warn!(
                        rule = %join_path(&path, Dimension::Level.config_key()),
                        level = %name,
                        error = %error,
                        "Incorrect level, skipping it"
                    );
                }
                Some(levels)
            }
            None => None,
        };

        let matcher = Self {
            levels,
            message: Self::patterns(criteria, Dimension::Message, parts, options)?,
            exception: Self::patterns(criteria, Dimension::Exception, parts, options)?,
            thread_name: Self::patterns(criteria, Dimension::ThreadName, parts, options)?,
            logger_name: Self::patterns(criteria, Dimension::LoggerName, parts, options)?,
            path,
        };

        debug!(
            rule = %matcher.path,
            levels = ?matcher.levels.as_ref().map(LevelSet::len),
            message = ?matcher.pattern_count(Dimension::Message),
            exception = ?matcher.pattern_count(Dimension::Exception),
            thread_name = ?matcher.pattern_count(Dimension::ThreadName),
            logger_name = ?matcher.pattern_count(Dimension::LoggerName),
            "Prepared rule matcher"
        );
        Ok(matcher)
    }

    fn patterns<N: ConfigNode>(
        criteria: &N,
        dimension: Dimension,
        parts: &PartRegistry,
        options: &CompileOptions,
    ) -> Result<Option<PatternList>> {
        let Some(raw) = criteria.string_list(dimension.config_key())? else {
            return Ok(None);
        };

        let (list, failures) = compile_patterns(raw, parts, options);
        if !failures.is_empty() {
            let location = join_path(criteria.path(), dimension.config_key());
            for (raw, error) in failures {
                match &error {
                    RuleError::InvalidPattern { pattern, source } => warn!(
                        rule = %location,
                        pattern = %pattern,
                        error = %source,
                        "Incorrect regex, skipping it"
                    ),
                    other => warn!(
                        rule = %location,
                        pattern = %raw,
                        error = %other,
                        "Incorrect regex, skipping it"
                    ),
                }
            }
        }
        Ok(Some(list))
    }

    /// Evaluate the rule against one event.
    ///
    /// Dimensions are checked in the order level, message, exception, thread
    /// name, logger name, stopping at the first one that rejects the event.
    /// Returns the captured groups of all matching dimensions, or `None`.
    pub fn matches(
        &self,
        message: Option<&str>,
        level: Level,
        exception: Option<&ExceptionInfo>,
        thread_name: Option<&str>,
        logger_name: Option<&str>,
    ) -> Option<MatchGroups> {
        let mut groups = MatchGroups::new();

        if let Some(levels) = &self.levels {
            if !levels.contains(level) {
                return None;
            }
        }

        if !Self::text_matches(self.message.as_ref(), message, &mut groups) {
            return None;
        }

        if let Some(patterns) = &self.exception {
            let trace = exception?.stack_trace();
            if !patterns.capture_first(&trace, &mut groups) {
                return None;
            }
        }

        if !Self::text_matches(self.thread_name.as_ref(), thread_name, &mut groups) {
            return None;
        }

        if !Self::text_matches(self.logger_name.as_ref(), logger_name, &mut groups) {
            return None;
        }

        Some(groups)
    }

    pub fn matches_event(&self, event: &LogEvent<'_>) -> Option<MatchGroups> {
        self.matches(
            event.message,
            event.level,
            event.exception,
            event.thread_name,
            event.logger_name,
        )
    }

    fn text_matches(
        patterns: Option<&PatternList>,
        input: Option<&str>,
        groups: &mut MatchGroups,
    ) -> bool {
        match (patterns, input) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(patterns), Some(input)) => patterns.capture_first(input, groups),
        }
    }

    /// Dotted configuration path of this rule.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether `dimension` filters events at all.
    pub fn is_constrained(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Level => self.levels.is_some(),
            other => self.pattern_list(other).is_some(),
        }
    }

    /// Whether no dimension is constrained, so every event matches.
    pub fn is_unconstrained(&self) -> bool {
        Dimension::ALL.iter().all(|d| !self.is_constrained(*d))
    }

    /// Number of compiled patterns for a text dimension, or `None` when the
    /// dimension is absent. For [`Dimension::Level`] this is the number of
    /// accepted levels.
    pub fn pattern_count(&self, dimension: Dimension) -> Option<usize> {
        match dimension {
            Dimension::Level => self.levels.as_ref().map(LevelSet::len),
            other => self.pattern_list(other).map(PatternList::len),
        }
    }

    fn pattern_list(&self, dimension: Dimension) -> Option<&PatternList> {
        match dimension {
            Dimension::Level => None,
            Dimension::Message => self.message.as_ref(),
            Dimension::Exception => self.exception.as_ref(),
            Dimension::ThreadName => self.thread_name.as_ref(),
            Dimension::LoggerName => self.logger_name.as_ref(),
        }
    }
}

impl fmt::Display for RuleMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleMatcher(path: {})", self.path)
    }
}
