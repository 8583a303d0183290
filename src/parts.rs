//! Reusable regex fragments ("parts").
//!
//! A part named `id` with fragment `[0-9]+` lets any rule pattern write
//! `user-{id}`, which expands to `user-(?<id>[0-9]+)` before compilation. The
//! expansion is a named group, so whatever the fragment captured is reported
//! under the part's name.

use crate::config::ConfigNode;
use crate::error::Result;
use std::collections::BTreeMap;

/// Placeholder table shared by every rule built from one configuration.
///
/// Fragments are not validated here; a broken fragment only surfaces when a
/// pattern using it fails to compile.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::PartRegistry;
///
/// let parts = PartRegistry::from_pairs([("id", "[0-9]+"), ("unused", "")]);
/// assert_eq!(parts.len(), 1);
/// assert_eq!(parts.substitute("user-{id}"), "user-(?<id>[0-9]+)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PartRegistry {
    /// Placeholder (`{name}`) to named-group replacement.
    replacements: BTreeMap<String, String>,
}

impl PartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a `parts` configuration node.
    ///
    /// Entries with a null or empty fragment are skipped.
    pub fn from_config<N: ConfigNode>(node: &N) -> Result<Self> {
        let mut registry = Self::new();
        for (name, fragment) in node.string_map()? {
            if let Some(fragment) = fragment {
                registry.insert(&name, &fragment);
            }
        }
        Ok(registry)
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut registry = Self::new();
        for (name, fragment) in pairs {
            registry.insert(name, fragment);
        }
        registry
    }

    /// Register `fragment` under `name`. Empty fragments are ignored.
    pub fn insert(&mut self, name: &str, fragment: &str) -> bool {
        if fragment.is_empty() {
            return false;
        }
        self.replacements
            .insert(format!("{{{name}}}"), format!("(?<{name}>{fragment})"));
        true
    }

    /// Expand every registered placeholder in `pattern`.
    ///
    /// Placeholders are matched as literal text, all occurrences are replaced,
    /// and unknown `{...}` sequences are left alone (they may be regex
    /// repetition counts such as `{2,3}`).
    pub fn substitute(&self, pattern: &str) -> String {
        let mut expanded = pattern.to_string();
        for (placeholder, replacement) in &self.replacements {
            if expanded.contains(placeholder.as_str()) {
                expanded = expanded.replace(placeholder.as_str(), replacement);
            }
        }
        expanded
    }

    pub fn contains(&self, name: &str) -> bool {
        self.replacements.contains_key(&format!("{{{name}}}"))
    }

    /// Part names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.replacements
            .keys()
            .map(|placeholder| &placeholder[1..placeholder.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}
