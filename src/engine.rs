//! Rule sets: every rule of one configuration section, evaluated together.
//!
//! A host typically keeps several sections (for example `events.rules` and
//! `events.filters`) that share one `parts` table. Each section compiles into
//! its own [`RuleSet`]; what to do with a match is up to the host.

use crate::config::{BatchConfig, CompileOptions, ConfigNode};
use crate::error::Result;
use crate::event::LogEvent;
use crate::matcher::{MatchGroups, RuleMatcher};
use crate::parts::PartRegistry;
use crate::stats::MatchStats;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Ordered collection of compiled rules.
///
/// # Usage Patterns
///
/// ## First Match
/// Rules are tried in document order and the first one that fires wins:
/// ```rust,ignore
/// if let Some((rule, groups)) = rules.first_match(&event) {
///     println!("{} fired: {}", rule.path(), groups.expand("{code}"));
/// }
/// ```
///
/// ## Batch Processing
/// Large batches are spread over the rayon thread pool:
/// ```rust,ignore
/// let verdicts = rules.evaluate_batch(&events);
/// ```
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::{Level, LogEvent, PartRegistry, RuleSet, YamlDocument};
///
/// let doc = YamlDocument::parse(
///     r#"
/// parts:
///   plugin: "[A-Za-z]+"
/// events:
///   filters:
///     noisy:
///       matchLevel: [DEBUG, TRACE]
///     plugin_errors:
///       matchLevel: [ERROR]
///       matchMessage: ["Could not pass event .* to {plugin}"]
/// "#,
/// )
/// .unwrap();
///
/// let parts = PartRegistry::from_config(&doc.node("parts").unwrap()).unwrap();
/// let rules = RuleSet::from_section(&doc.node("events.filters").unwrap(), &parts).unwrap();
/// assert_eq!(rules.len(), 2);
///
/// let event = LogEvent::new(Level::Error).message("Could not pass event PlayerJoin to Shop");
/// let (rule, groups) = rules.first_match(&event).unwrap();
/// assert_eq!(rule.path(), "events.filters.plugin_errors");
/// assert_eq!(groups.get("plugin"), Some("Shop"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RuleMatcher>,
    batch: BatchConfig,
    stats: Option<Arc<MatchStats>>,
}

impl RuleSet {
    pub fn new(rules: Vec<RuleMatcher>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Compile every child of `section` as a rule, in document order.
    ///
    /// # Errors
    ///
    /// Fails when the section is not a mapping or when any rule has a
    /// configuration-shape error.
    pub fn from_section<N: ConfigNode>(section: &N, parts: &PartRegistry) -> Result<Self> {
        Self::from_section_with_options(section, parts, &CompileOptions::default())
    }

    pub fn from_section_with_options<N: ConfigNode>(
        section: &N,
        parts: &PartRegistry,
        options: &CompileOptions,
    ) -> Result<Self> {
        let mut rules = Vec::new();
        for key in section.child_keys()? {
            if let Some(criteria) = section.child(&key) {
                rules.push(RuleMatcher::with_options(&criteria, parts, options)?);
            }
        }
        debug!(section = %section.path(), rules = rules.len(), "Loaded rule section");
        Ok(Self::new(rules))
    }

    pub fn with_batch_config(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Record every evaluation of this set into `stats`.
    pub fn with_stats(mut self, stats: Arc<MatchStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// First rule, in order, that matches `event`.
    pub fn first_match(&self, event: &LogEvent<'_>) -> Option<(&RuleMatcher, MatchGroups)> {
        let found = self
            .rules
            .iter()
            .find_map(|rule| rule.matches_event(event).map(|groups| (rule, groups)));
        if let Some(stats) = &self.stats {
            stats.record(found.is_some());
        }
        found
    }

    /// Every rule that matches `event`, in order.
    pub fn matching(&self, event: &LogEvent<'_>) -> Vec<(&RuleMatcher, MatchGroups)> {
        self.rules
            .iter()
            .filter_map(|rule| rule.matches_event(event).map(|groups| (rule, groups)))
            .collect()
    }

    /// Whether any rule matches `event`.
    pub fn any_match(&self, event: &LogEvent<'_>) -> bool {
        self.first_match(event).is_some()
    }

    /// [`first_match`](Self::first_match) for each event, results in input
    /// order.
    pub fn evaluate_batch(&self, events: &[LogEvent<'_>]) -> Vec<Option<(&RuleMatcher, MatchGroups)>> {
        if events.len() < self.batch.min_batch_size_for_parallelism {
            events.iter().map(|event| self.first_match(event)).collect()
        } else {
            events.par_iter().map(|event| self.first_match(event)).collect()
        }
    }

    pub fn get(&self, path: &str) -> Option<&RuleMatcher> {
        self.rules.iter().find(|rule| rule.path() == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleMatcher> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleMatcher;
    type IntoIter = std::slice::Iter<'a, RuleMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
