//! `// want "regex"` expectations
//!
//! A fixture line may carry one or more quoted regular expressions after
//! `// want`. Every diagnostic reported on that line must be matched by a
//! distinct expectation, and every expectation must be used.

use prealloc_ir::{analyze_source, Diagnostic, PreallocConfig};
use regex::Regex;

use super::fixtures::load_fixture;

#[derive(Debug)]
pub struct Want {
    pub line: u32,
    pub pattern: Regex,
}

/// Undo Go string escaping: `\\` and `\"`
fn unquote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn parse_wants(source: &str) -> Vec<Want> {
    let quoted = Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap();
    let mut wants = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let Some(at) = line.find("// want ") else {
            continue;
        };
        for capture in quoted.captures_iter(&line[at..]) {
            let pattern = unquote(&capture[1]);
            wants.push(Want {
                line: index as u32 + 1,
                pattern: Regex::new(&pattern)
                    .unwrap_or_else(|e| panic!("bad want pattern {:?}: {}", pattern, e)),
            });
        }
    }
    wants
}

/// Mismatches between `diagnostics` and the expectations in `source`
pub fn want_mismatches(source: &str, diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut wants: Vec<Option<Want>> = parse_wants(source).into_iter().map(Some).collect();
    let mut problems = Vec::new();

    for diagnostic in diagnostics {
        let matched = wants.iter_mut().find(|slot| {
            slot.as_ref().is_some_and(|want| {
                want.line == diagnostic.line() && want.pattern.is_match(&diagnostic.message)
            })
        });
        match matched {
            Some(slot) => *slot = None,
            None => problems.push(format!(
                "{}: unexpected diagnostic: {}",
                diagnostic.position, diagnostic.message
            )),
        }
    }

    problems.extend(
        wants
            .into_iter()
            .flatten()
            .map(|want| format!("{}: no diagnostic matching {:?}", want.line, want.pattern.as_str())),
    );
    problems
}

/// Analyze a `tests/testdata` fixture and check its `// want` comments
pub fn assert_fixture(name: &str, config: &PreallocConfig) {
    let source = load_fixture(name);
    let diagnostics = analyze_source(&source, name, config)
        .unwrap_or_else(|e| panic!("analysis of {} failed: {}", name, e));

    let problems = want_mismatches(&source, &diagnostics);
    assert!(
        problems.is_empty(),
        "{} mismatches in {}:\n{}",
        problems.len(),
        name,
        problems.join("\n")
    );
}

/// Rendered `line:col: message` list, for exact comparisons
pub fn rendered(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .map(|d| format!("{}: {}", d.position, d.message))
        .collect()
}
