//! Rule compilation and matching.
//!
//! The matcher system separates compilation from evaluation:
//! - **Compilation** happens once per rule at configuration-load time. Parts
//!   are expanded, patterns compiled and level names resolved. Broken entries
//!   are logged and dropped, see [`compile_batch`].
//! - **Evaluation** is a pure function of the compiled [`RuleMatcher`] and one
//!   event. It writes only into the [`MatchGroups`] it returns.
//!
//! ## Core Components
//!
//! - [`RuleMatcher`] - one compiled rule
//! - [`PatternList`] / [`LevelSet`] - per-dimension constraints
//! - [`MatchGroups`] - captured substrings of a successful match

pub mod compile;
pub mod groups;
pub mod rule;
pub mod types;

pub use compile::{compile_batch, compile_levels, compile_pattern, compile_patterns, BatchCompile};
pub use groups::MatchGroups;
pub use rule::RuleMatcher;
pub use types::{Dimension, LevelSet, PatternList};
