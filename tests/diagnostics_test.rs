//! Warnings emitted while rules are prepared.

use event_rule_engine::{Dimension, PartRegistry, RuleMatcher, YamlDocument};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn build_with_log(source: &str, rule: &str) -> (RuleMatcher, String) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let doc = YamlDocument::parse(source).unwrap();
    let parts = match doc.node("parts") {
        Some(node) => PartRegistry::from_config(&node).unwrap(),
        None => PartRegistry::new(),
    };
    let matcher = tracing::subscriber::with_default(subscriber, || {
        RuleMatcher::new(&doc.node(rule).unwrap(), &parts).unwrap()
    });
    (matcher, log.contents())
}

#[test]
fn test_invalid_regex_warning_names_rule_and_expanded_pattern() {
    let (rule, log) = build_with_log(
        r#"
parts:
  bad: "[a-"
rules:
  r:
    matchMessage: ["x{bad}", "ok"]
"#,
        "rules.r",
    );

    assert_eq!(rule.pattern_count(Dimension::Message), Some(1));
    assert!(log.contains("Incorrect regex, skipping it"), "log: {log}");
    assert!(log.contains("rule=rules.r.matchMessage"), "log: {log}");
    assert!(log.contains("pattern=x(?<bad>[a-)"), "log: {log}");
    assert!(!log.contains("pattern=ok"), "log: {log}");
}

#[test]
fn test_unknown_level_warning_names_rule_and_level() {
    let (rule, log) = build_with_log(
        "rules:\n  levels:\n    matchLevel: [SEVERE, ERROR]\n",
        "rules.levels",
    );

    assert_eq!(rule.pattern_count(Dimension::Level), Some(1));
    assert!(log.contains("Incorrect level, skipping it"), "log: {log}");
    assert!(log.contains("rule=rules.levels.matchLevel"), "log: {log}");
    assert!(log.contains("level=SEVERE"), "log: {log}");
}

#[test]
fn test_valid_rule_logs_no_warnings() {
    let (_, log) = build_with_log(
        "rules:\n  fine:\n    matchLevel: [WARN]\n    matchMessage: [\"tick\"]\n",
        "rules.fine",
    );
    assert!(log.is_empty(), "log: {log}");
}
