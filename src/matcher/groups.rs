//! Capture groups collected while matching an event.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Substrings captured by the patterns of a matching rule.
///
/// Keys are either a named group's name or a group's 1-based index rendered as
/// a string. A named group is recorded under both. When several dimensions
/// capture under the same key, the dimension evaluated last wins.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::MatchGroups;
/// use regex::Regex;
///
/// let mut groups = MatchGroups::new();
/// let pattern = Regex::new(r"(?<code>[A-Z]+)-(\d+)").unwrap();
/// assert!(groups.capture(&pattern, "ERR-17"));
///
/// assert_eq!(groups.get("code"), Some("ERR"));
/// assert_eq!(groups.get("1"), Some("ERR"));
/// assert_eq!(groups.get("2"), Some("17"));
/// assert_eq!(groups.expand("{code} #{2}"), "ERR #17");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchGroups {
    groups: BTreeMap<String, String>,
}

impl MatchGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `input` with `pattern` and record its groups on success.
    ///
    /// Groups that did not take part in the match are skipped; nothing is
    /// recorded when the pattern does not match.
    pub fn capture(&mut self, pattern: &Regex, input: &str) -> bool {
        // Group 0 only: no captures to collect.
        if pattern.captures_len() == 1 {
            return pattern.is_match(input);
        }

        let Some(captures) = pattern.captures(input) else {
            return false;
        };

        for name in pattern.capture_names().flatten() {
            if let Some(group) = captures.name(name) {
                self.groups.insert(name.to_string(), group.as_str().to_string());
            }
        }

        for index in 1..captures.len() {
            if let Some(group) = captures.get(index) {
                self.groups
                    .insert(index.to_string(), group.as_str().to_string());
            }
        }
        true
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.groups.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.groups.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Replace every `{key}` in `template` with the captured value.
    ///
    /// Keys without a captured value are left as written.
    pub fn expand(&self, template: &str) -> String {
        let mut expanded = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            expanded.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            match after_open.find('}') {
                Some(close) => {
                    let key = &after_open[..close];
                    match self.groups.get(key) {
                        Some(value) if !key.contains('{') => expanded.push_str(value),
                        _ => {
                            // Keep the brace and rescan from the next character so a
                            // nested `{key}` is still found.
                            expanded.push('{');
                            rest = after_open;
                            continue;
                        }
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    expanded.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        expanded.push_str(rest);
        expanded
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.groups
    }
}

impl From<BTreeMap<String, String>> for MatchGroups {
    fn from(groups: BTreeMap<String, String>) -> Self {
        Self { groups }
    }
}

impl<'a> IntoIterator for &'a MatchGroups {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
