//! # Event Rule Engine
//!
//! A rule-based classifier for log and error events. A rule constrains any of
//! five dimensions of an event (level, message, exception stack trace, thread
//! name, logger name). When every constrained dimension accepts the event the
//! rule matches, and the substrings captured by its patterns are handed back
//! for building titles, fingerprints or payloads.
//!
//! ## Quick Start
//!
//! ```rust
//! use event_rule_engine::{Level, LogEvent, PartRegistry, RuleMatcher, YamlDocument};
//!
//! let config = YamlDocument::parse(
//!     r#"
//! parts:
//!   player: "[A-Za-z0-9_]{3,16}"
//! rules:
//!   kicked:
//!     matchLevel: [WARN, ERROR]
//!     matchMessage: ["{player} was kicked: (?<reason>.+)"]
//! "#,
//! )?;
//!
//! // Parts are shared by every rule of the configuration.
//! let parts = PartRegistry::from_config(&config.node("parts").unwrap())?;
//! let rule = RuleMatcher::new(&config.node("rules.kicked").unwrap(), &parts)?;
//!
//! let event = LogEvent::new(Level::Warn).message("Notch was kicked: flying");
//! let groups = rule.matches_event(&event).expect("rule should match");
//!
//! assert_eq!(groups.get("player"), Some("Notch"));
//! assert_eq!(groups.get("reason"), Some("flying"));
//! assert_eq!(groups.expand("{player} kicked ({reason})"), "Notch kicked (flying)");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Rule Criteria
//!
//! | Key | Content | Matched against |
//! |-----|---------|-----------------|
//! | `matchLevel` | level names | event severity |
//! | `matchMessage` | regex patterns | message text |
//! | `matchException` | regex patterns | rendered stack trace |
//! | `matchThreadName` | regex patterns | thread name |
//! | `matchLoggerName` | regex patterns | logger name |
//!
//! A missing key leaves that dimension unconstrained. Patterns that fail to
//! compile and unknown level names are logged through `tracing` and skipped;
//! a key whose entries all failed still constrains its dimension and never
//! matches.
//!
//! Patterns use the [`regex`] crate syntax. Lookahead, lookbehind,
//! backreferences and possessive quantifiers are not supported, so rules
//! written for a backtracking engine that rely on them are rejected at load
//! time with a warning. Patterns search anywhere in the input; anchor them
//! with `^` and `$` where needed.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod level;
pub mod matcher;
pub mod parts;
pub mod stats;

pub use config::{BatchConfig, CompileOptions, ConfigNode, YamlDocument, YamlNode};
pub use engine::RuleSet;
pub use error::{Result, RuleError};
pub use event::{ExceptionInfo, LogEvent};
pub use level::Level;
pub use matcher::{Dimension, MatchGroups, RuleMatcher};
pub use parts::PartRegistry;
pub use stats::{MatchStats, StatsSnapshot};
