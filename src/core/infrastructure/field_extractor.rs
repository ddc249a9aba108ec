//! Best-effort field lookup in line-oriented guest config files.
//!
//! Proxmox guest configs are `key: value` lines (older tooling also writes
//! `key=value`). A missing field is not an error: lookups return an empty
//! string and callers apply their own typed fallback.

use crate::core::domain::error::{ParseError, ReportError, ReportResult};
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};

/// A case-insensitive pattern matched against the start of a line.
#[derive(Debug, Clone)]
pub struct FieldPattern(Regex);

impl FieldPattern {
    /// Compiles `pattern`, anchored at the start of the line.
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        RegexBuilder::new(&format!("^(?:{})", pattern))
            .case_insensitive(true)
            .build()
            .map(Self)
            .map_err(|e| ParseError::Format(format!("Invalid field pattern '{}': {}", pattern, e)))
    }

    /// Pattern for `key:` / `key=` lines. `name` does not match `nameserver`.
    pub fn for_field(name: &str) -> Result<Self, ParseError> {
        Self::new(&format!(r"{}\s*[=:]", regex::escape(name)))
    }

    pub fn matches(&self, line: &str) -> bool {
        self.0.is_match(line)
    }
}

/// The contents of one config file, read once and queried many times.
#[derive(Debug, Clone)]
pub struct ConfigText {
    path: PathBuf,
    contents: String,
}

impl ConfigText {
    pub async fn load(path: &Path) -> ReportResult<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReportError::io(path, e))?;
        Ok(Self::from_contents(path, contents))
    }

    pub fn from_contents(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.contents.lines()
    }

    /// Value of the first matching line: the trimmed text after the first `=` or `:`.
    ///
    /// Empty when no line matches or the matching line has no separator.
    pub fn value(&self, pattern: &FieldPattern) -> String {
        self.lines()
            .find(|line| pattern.matches(line))
            .and_then(|line| line.split_once(['=', ':']))
            .map(|(_, value)| value.trim().to_string())
            .unwrap_or_default()
    }

    /// The first matching line, trimmed. Empty when nothing matches.
    pub fn line(&self, pattern: &FieldPattern) -> String {
        self.lines()
            .find(|line| pattern.matches(line))
            .map(|line| line.trim().to_string())
            .unwrap_or_default()
    }
}

/// Reads `path` and returns the value of the first line matching `pattern`.
pub async fn extract_value(path: &Path, pattern: &FieldPattern) -> ReportResult<String> {
    Ok(ConfigText::load(path).await?.value(pattern))
}

/// Reads `path` and returns the first line matching `pattern`.
pub async fn extract_line(path: &Path, pattern: &FieldPattern) -> ReportResult<String> {
    Ok(ConfigText::load(path).await?.line(pattern))
}
