//! Fallible batch compilation of rule criteria.
//!
//! Every entry of a criteria list is compiled on its own. Failures are
//! collected next to the successes so the caller can report them and carry on
//! with whatever compiled.

use crate::config::CompileOptions;
use crate::error::{Result, RuleError};
use crate::level::Level;
use crate::matcher::types::{LevelSet, PatternList};
use crate::parts::PartRegistry;
use regex::{Regex, RegexBuilder};

/// Outcome of compiling a list of raw entries.
#[derive(Debug)]
pub struct BatchCompile<T, S> {
    /// Successfully compiled entries, in input order.
    pub compiled: Vec<T>,
    /// Raw entries that failed, with the reason.
    pub failures: Vec<(S, RuleError)>,
}

impl<T, S> BatchCompile<T, S> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compile each source entry with `compile`, keeping going past failures.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::matcher::compile_batch;
/// use event_rule_engine::Level;
///
/// let batch = compile_batch(vec!["ERROR", "LOUD", "warn"], |name| name.parse::<Level>());
/// assert_eq!(batch.compiled, vec![Level::Error, Level::Warn]);
/// assert_eq!(batch.failures.len(), 1);
/// assert_eq!(batch.failures[0].0, "LOUD");
/// ```
pub fn compile_batch<S, T, F>(
    sources: impl IntoIterator<Item = S>,
    mut compile: F,
) -> BatchCompile<T, S>
where
    F: FnMut(&S) -> Result<T>,
{
    let mut compiled = Vec::new();
    let mut failures = Vec::new();
    for source in sources {
        match compile(&source) {
            Ok(value) => compiled.push(value),
            Err(error) => failures.push((source, error)),
        }
    }
    BatchCompile { compiled, failures }
}

/// Expand parts in `raw` and compile the result.
///
/// On failure the error carries the expanded pattern, which is what the regex
/// engine actually rejected.
pub fn compile_pattern(raw: &str, parts: &PartRegistry, options: &CompileOptions) -> Result<Regex> {
    let expanded = parts.substitute(raw);
    RegexBuilder::new(&expanded)
        .size_limit(options.regex_size_limit)
        .dfa_size_limit(options.dfa_size_limit)
        .case_insensitive(options.case_insensitive)
        .build()
        .map_err(|source| RuleError::InvalidPattern {
            pattern: expanded,
            source,
        })
}

pub fn compile_patterns(
    raw: Vec<String>,
    parts: &PartRegistry,
    options: &CompileOptions,
) -> (PatternList, Vec<(String, RuleError)>) {
    let batch = compile_batch(raw, |pattern| compile_pattern(pattern, parts, options));
    (PatternList::new(batch.compiled), batch.failures)
}

pub fn compile_levels(names: Vec<String>) -> (LevelSet, Vec<(String, RuleError)>) {
    let batch = compile_batch(names, |name| name.parse::<Level>());
    (LevelSet::new(batch.compiled), batch.failures)
}
