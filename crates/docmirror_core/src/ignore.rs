//! Exclusion rules loaded from an ignore file.

use std::fs;
use std::path::Path;

/// A set of path and name exclusions.
///
/// Rules containing `/` are compared against the candidate's normalized
/// path relative to the scan root. Other rules are compared against the
/// bare file or directory name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    paths: Vec<String>,
    names: Vec<String>,
}

impl IgnoreRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads rules from a newline-delimited file.
    ///
    /// A missing or unreadable file yields an empty rule set.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no ignore rules loaded");
                Self::new()
            }
        }
    }

    /// Parses rules from text. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Self {
        text.lines().fold(Self::new(), |rules, line| rules.with_rule(line))
    }

    /// Adds one rule.
    pub fn with_rule(mut self, rule: &str) -> Self {
        let rule = rule.trim();
        if rule.is_empty() || rule.starts_with('#') {
            return self;
        }
        let rule = rule.strip_prefix("./").unwrap_or(rule);
        let rule = rule.trim_end_matches('/');
        if rule.is_empty() {
            return self;
        }

        if rule.contains('/') {
            self.paths.push(rule.to_string());
        } else {
            self.names.push(rule.to_string());
        }
        self
    }

    /// Returns true if the candidate is excluded.
    pub fn is_ignored(&self, relative_path: &str, name: &str) -> bool {
        self.paths.iter().any(|rule| rule == relative_path)
            || self.names.iter().any(|rule| rule == name)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.paths.len() + self.names.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
