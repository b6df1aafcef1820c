//! Static fact-dependency analysis of condition text
//!
//! Scans a condition for `#name` references without parsing it, so rule
//! inputs can be checked against a fact context before evaluation.
//! Quoted string literals are skipped and `#root` / `#this` are not facts.
//! The scan is conservative: a reference it cannot see is simply not
//! reported, but anything it reports is a real reference.

use crate::lexer::{is_ident_char, is_ident_start, SIGIL};
use ruleforge_core::FactContext;

/// Variable names that refer to the root object rather than a fact
const RESERVED: &[&str] = &["root", "this"];

/// A fact referenced by a condition, with the accessor chain that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactReference {
    /// Top-level fact name (`trade` in `#trade.value`)
    pub name: String,
    /// Property names dereferenced from the fact, stopping before a call
    pub path: Vec<String>,
}

impl FactReference {
    /// Dotted form, e.g. `trade.value`
    pub fn dotted(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Dependency extractor
pub struct DependencyExtractor;

impl DependencyExtractor {
    /// Distinct fact names referenced by `condition`, in first-seen order
    pub fn extract(condition: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for reference in Self::extract_references(condition) {
            if !names.contains(&reference.name) {
                names.push(reference.name);
            }
        }
        names
    }

    /// Every fact reference in `condition` with its property path, in source order
    pub fn extract_references(condition: &str) -> Vec<FactReference> {
        let chars: Vec<char> = condition.chars().collect();
        let mut references = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' || c == '"' {
                i = skip_string(&chars, i);
                continue;
            }

            if c != SIGIL || !chars.get(i + 1).copied().is_some_and(is_ident_start) {
                i += 1;
                continue;
            }

            i += 1;
            let name = read_ident(&chars, &mut i);
            let path = read_path(&chars, &mut i);

            if !RESERVED.contains(&name.as_str()) {
                references.push(FactReference { name, path });
            }
        }

        references
    }

    /// Referenced facts absent from `facts`, in first-seen order
    pub fn missing_facts(condition: &str, facts: &FactContext) -> Vec<String> {
        Self::extract(condition)
            .into_iter()
            .filter(|name| !facts.contains(name))
            .collect()
    }
}

fn read_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && is_ident_char(chars[*i]) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

/// Follow `.name` / `?.name` segments; a segment followed by `(` is a method
/// call and ends the path
fn read_path(chars: &[char], i: &mut usize) -> Vec<String> {
    let mut path = Vec::new();
    loop {
        let mut j = *i;
        if chars.get(j) == Some(&'?') {
            j += 1;
        }
        if chars.get(j) != Some(&'.') || !chars.get(j + 1).copied().is_some_and(is_ident_start) {
            break;
        }
        j += 1;
        let segment = read_ident(chars, &mut j);
        if chars.get(j) == Some(&'(') {
            break;
        }
        path.push(segment);
        *i = j;
    }
    path
}

/// Index just past the closing quote (or the end of input)
fn skip_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == quote {
            if chars.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    i
}
