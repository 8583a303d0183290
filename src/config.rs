//! Configuration access and compilation settings.
//!
//! Rule criteria and parts reach the engine through the narrow [`ConfigNode`]
//! reader, so the matching code never depends on a concrete configuration
//! format. [`YamlNode`] implements it over `serde_yaml` values; hosts with
//! another configuration library implement the trait themselves.
//!
//! Reader conventions:
//! - a scalar where a list is expected is read as a one-element list;
//! - numbers and booleans are rendered as strings;
//! - `null` and an empty list behave exactly like an absent key.

use crate::error::{Result, RuleError};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Read-only, path-aware view of a configuration tree.
pub trait ConfigNode: Sized {
    /// Dotted path of this node from the document root, used in diagnostics.
    fn path(&self) -> &str;

    /// Child node under `key`, or `None` when the key is absent.
    fn child(&self, key: &str) -> Option<Self>;

    /// Keys of this node's children in document order.
    ///
    /// An absent or null node has no children.
    fn child_keys(&self) -> Result<Vec<String>>;

    /// String list stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent, null or an empty list, and
    /// when this node itself is null. Any other non-mapping node is a shape
    /// error.
    fn string_list(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Flat `name -> value` view of this node. Null values map to `None`.
    fn string_map(&self) -> Result<Vec<(String, Option<String>)>>;
}

/// Joins a parent path and a key into a dotted path.
pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// [`ConfigNode`] over a borrowed `serde_yaml` value.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::{ConfigNode, YamlDocument};
///
/// let doc = YamlDocument::parse(
///     r#"
/// events:
///   rules:
///     database:
///       matchMessage: "Connection refused"
/// "#,
/// )
/// .unwrap();
///
/// let rule = doc.root().child("events").unwrap().child("rules").unwrap().child("database").unwrap();
/// assert_eq!(rule.path(), "events.rules.database");
/// assert_eq!(
///     rule.string_list("matchMessage").unwrap(),
///     Some(vec!["Connection refused".to_string()])
/// );
/// assert_eq!(rule.string_list("matchLevel").unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct YamlNode<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> YamlNode<'a> {
    /// Wrap a value as the document root.
    pub fn new(value: &'a Value) -> Self {
        Self::with_path(value, "")
    }

    /// Wrap a value that lives at `path` in a larger document.
    pub fn with_path(value: &'a Value, path: impl Into<String>) -> Self {
        Self {
            value,
            path: path.into(),
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl<'a> ConfigNode for YamlNode<'a> {
    fn path(&self) -> &str {
        &self.path
    }

    fn child(&self, key: &str) -> Option<Self> {
        self.value
            .get(key)
            .map(|value| YamlNode::with_path(value, join_path(&self.path, key)))
    }

    fn child_keys(&self) -> Result<Vec<String>> {
        match self.value {
            Value::Null => Ok(Vec::new()),
            Value::Mapping(mapping) => mapping
                .keys()
                .map(|key| {
                    scalar_to_string(key).ok_or_else(|| {
                        RuleError::config_shape(self.path.clone(), "scalar key", value_kind(key))
                    })
                })
                .collect(),
            other => Err(RuleError::config_shape(
                self.path.clone(),
                "mapping",
                value_kind(other),
            )),
        }
    }

    fn string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.value {
            Value::Null => return Ok(None),
            Value::Mapping(_) => {}
            other => {
                return Err(RuleError::config_shape(
                    self.path.clone(),
                    "mapping",
                    value_kind(other),
                ))
            }
        }

        let path = join_path(&self.path, key);
        match self.value.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Sequence(items)) if items.is_empty() => Ok(None),
            Some(Value::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    scalar_to_string(item).ok_or_else(|| {
                        RuleError::config_shape(
                            format!("{path}[{index}]"),
                            "string",
                            value_kind(item),
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => scalar_to_string(other)
                .map(|single| Some(vec![single]))
                .ok_or_else(|| RuleError::config_shape(path, "list of strings", value_kind(other))),
        }
    }

    fn string_map(&self) -> Result<Vec<(String, Option<String>)>> {
        let mapping = match self.value {
            Value::Null => return Ok(Vec::new()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(RuleError::config_shape(
                    self.path.clone(),
                    "mapping",
                    value_kind(other),
                ))
            }
        };

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = scalar_to_string(key).ok_or_else(|| {
                RuleError::config_shape(self.path.clone(), "scalar key", value_kind(key))
            })?;
            let text = match value {
                Value::Null => None,
                scalar => Some(scalar_to_string(scalar).ok_or_else(|| {
                    RuleError::config_shape(join_path(&self.path, &name), "string", value_kind(scalar))
                })?),
            };
            entries.push((name, text));
        }
        Ok(entries)
    }
}

/// An owned YAML document that hands out [`YamlNode`] views.
#[derive(Debug, Clone)]
pub struct YamlDocument {
    value: Value,
}

impl YamlDocument {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            value: serde_yaml::from_str(source)?,
        })
    }

    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    pub fn root(&self) -> YamlNode<'_> {
        YamlNode::new(&self.value)
    }

    /// Node at a dotted path such as `events.rules`, if every segment exists.
    pub fn node(&self, path: &str) -> Option<YamlNode<'_>> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.root(), |node, segment| node.child(segment))
    }
}

/// Settings applied when rule patterns are compiled.
///
/// The `regex` engine matches in linear time, so the remaining resource risk
/// sits in compiled program size. Both limits are passed straight to
/// [`regex::RegexBuilder`].
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::CompileOptions;
///
/// let options: CompileOptions = serde_yaml::from_str("case_insensitive: true").unwrap();
/// assert!(options.case_insensitive);
/// assert_eq!(options.regex_size_limit, CompileOptions::default().regex_size_limit);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Upper bound, in bytes, on the size of one compiled pattern.
    pub regex_size_limit: usize,
    /// Upper bound, in bytes, on the lazy DFA cache of one pattern.
    pub dfa_size_limit: usize,
    /// Compile every pattern case-insensitively.
    pub case_insensitive: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            regex_size_limit: 10 * (1 << 20),
            dfa_size_limit: 2 * (1 << 20),
            case_insensitive: false,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_regex_size_limit(mut self, limit: usize) -> Self {
        self.regex_size_limit = limit;
        self
    }
}

/// Batch evaluation settings for [`RuleSet`](crate::RuleSet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Batches smaller than this are evaluated on the calling thread.
    pub min_batch_size_for_parallelism: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_batch_size_for_parallelism: 64,
        }
    }
}
