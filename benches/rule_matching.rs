//! Rule matching benchmarks.
//!
//! Measures rule compilation and evaluation for rule sets of increasing size,
//! with a mix of level-only, message and exception rules.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use event_rule_engine::{
    BatchConfig, ExceptionInfo, Level, LogEvent, PartRegistry, RuleSet, YamlDocument,
};
use std::fmt::Write;

fn generate_rules_yaml(rule_count: usize) -> String {
    let mut yaml = String::from(
        "parts:\n  plugin: \"[A-Za-z][A-Za-z0-9_-]*\"\n  id: \"[0-9]+\"\nrules:\n",
    );
    for i in 0..rule_count {
        match i % 3 {
            0 => {
                let _ = writeln!(yaml, "  level_{i}:\n    matchLevel: [FATAL]");
            }
            1 => {
                let _ = writeln!(
                    yaml,
                    "  message_{i}:\n    matchLevel: [ERROR]\n    matchMessage: [\"task-{i} failed in {{plugin}} \\\\(id {{id}}\\\\)\"]"
                );
            }
            _ => {
                let _ = writeln!(
                    yaml,
                    "  exception_{i}:\n    matchException: [\"Exception{i}: .*\"]"
                );
            }
        }
    }
    yaml
}

fn build_rule_set(yaml: &str) -> RuleSet {
    let doc = YamlDocument::parse(yaml).unwrap();
    let parts = PartRegistry::from_config(&doc.node("parts").unwrap()).unwrap();
    RuleSet::from_section(&doc.node("rules").unwrap(), &parts).unwrap()
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_compilation");

    for rule_count in [10, 100, 1000].iter() {
        let yaml = generate_rules_yaml(*rule_count);
        group.bench_with_input(BenchmarkId::new("from_section", rule_count), rule_count, |b, _| {
            b.iter(|| black_box(build_rule_set(&yaml)))
        });
    }

    group.finish();
}

fn bench_first_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_match");
    let exception = ExceptionInfo::new("java.lang.IllegalStateException")
        .with_message("closed")
        .with_frame("com.example.Channel.write(Channel.java:7)");

    for rule_count in [10, 100, 1000].iter() {
        let rules = build_rule_set(&generate_rules_yaml(*rule_count));
        let last_message_rule = (0..*rule_count).rev().find(|i| i % 3 == 1).unwrap();
        let last_message = format!("task-{last_message_rule} failed in Shop (id 42)");

        let events = [
            // Matches nothing: every rule is checked.
            LogEvent::new(Level::Info).message("Server tick"),
            // Matches a message rule near the end of the set.
            LogEvent::new(Level::Error).message(&last_message),
            LogEvent::new(Level::Warn).exception(&exception),
        ];

        group.bench_with_input(BenchmarkId::new("evaluate", rule_count), rule_count, |b, _| {
            b.iter(|| {
                for event in &events {
                    black_box(rules.first_match(event));
                }
            })
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_batch");
    let rules = build_rule_set(&generate_rules_yaml(300));

    let messages: Vec<String> = (0..1000)
        .map(|i| format!("task-{} failed in Plugin{} (id {})", i % 300, i, i))
        .collect();
    let events: Vec<LogEvent<'_>> = messages
        .iter()
        .map(|m| LogEvent::new(Level::Error).message(m))
        .collect();

    for threshold in [usize::MAX, 64].iter() {
        let rules = rules.clone().with_batch_config(BatchConfig {
            min_batch_size_for_parallelism: *threshold,
        });
        let label = if *threshold == usize::MAX { "sequential" } else { "parallel" };
        group.bench_function(label, |b| b.iter(|| black_box(rules.evaluate_batch(&events))));
    }

    group.finish();
}

criterion_group!(benches, bench_compilation, bench_first_match, bench_batch);
criterion_main!(benches);
