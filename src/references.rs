//! Reference-style link definitions (`[key]: url`).
//!
//! Definitions are collected from the whole article before any line is
//! parsed, so a link may use a key that is only defined further down.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static DEFINITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[([^\]]+)\]:(.*)$").expect("valid regex"));

/// Mapping from reference key to link target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    entries: HashMap<String, String>,
}

impl ReferenceTable {
    /// Collect every reference definition in `lines`.
    ///
    /// Later definitions of the same key replace earlier ones.
    pub fn collect<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::default();
        for line in lines {
            if let Some((key, value)) = parse_definition(line) {
                table.insert(key, value);
            }
        }
        table
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up the target for `key`.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `line` is a reference definition.
pub fn is_definition(line: &str) -> bool {
    DEFINITION_RE.is_match(line)
}

/// Split a definition line into its trimmed key and value.
fn parse_definition(line: &str) -> Option<(&str, &str)> {
    let caps = DEFINITION_RE.captures(line)?;
    let key = caps.get(1)?.as_str().trim();
    let value = caps.get(2)?.as_str().trim();
    Some((key, value))
}
