//! Error types for the event rule engine.
//!
//! Only [`RuleError::ConfigShape`] and [`RuleError::Yaml`] ever leave rule
//! construction as failures. Pattern and level errors are produced by the batch
//! compiler, logged by the caller and dropped.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuleError>;

#[derive(Debug, Error)]
pub enum RuleError {
    /// A configuration node does not have the shape the reader expected.
    #[error("Invalid configuration at {path}: expected {expected}, found {found}")]
    ConfigShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A rule pattern failed to compile after part substitution.
    #[error("Invalid regex pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RuleError {
    pub(crate) fn config_shape(
        path: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        RuleError::ConfigShape {
            path: path.into(),
            expected,
            found,
        }
    }

    /// Whether this error is fatal for the rule being built.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RuleError::ConfigShape { .. } | RuleError::Yaml(_))
    }
}
