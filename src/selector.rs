//! Selection of the tracked files that take part in the statistics.
//!
//! A tracked path is kept only when it passes four independent checks, applied
//! in this order:
//!
//! 1. no exclude pattern matches it,
//! 2. some restrict-to pattern matches it (when any are given),
//! 3. its extension is in the extension allow-list (when non-empty),
//! 4. its extension is in the language-derived extension set (when non-empty).
//!
//! Patterns are regular expressions searched anywhere in the relative path.
//! Checks 3 and 4 are deliberately separate: a file must satisfy both, so two
//! non-overlapping filters select nothing.

use crate::error::Result;
use regex::Regex;
use std::collections::HashSet;

/// Splits a comma-separated flag value, dropping blank entries.
///
/// # Examples
///
/// ```
/// use gitfame_core::selector::split_comma_list;
///
/// assert_eq!(split_comma_list(".go,,.py"), vec![".go", ".py"]);
/// assert!(split_comma_list("").is_empty());
/// ```
#[must_use]
pub fn split_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the extension of the last path component, starting at its last dot.
///
/// `src/a.go` gives `.go`, `.gitignore` gives `.gitignore` and `Makefile` gives
/// an empty string.
#[must_use]
pub fn file_extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

/// The compiled set of path filters.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    exclude: Vec<Regex>,
    restrict_to: Vec<Regex>,
    extensions: HashSet<String>,
    language_extensions: HashSet<String>,
}

impl FileFilter {
    /// Compiles the filter.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any pattern is not a valid regular
    /// expression.
    pub fn new<S: AsRef<str>>(
        exclude: &[S],
        restrict_to: &[S],
        extensions: &[S],
        language_extensions: HashSet<String>,
    ) -> Result<Self> {
        Ok(Self {
            exclude: compile_patterns(exclude)?,
            restrict_to: compile_patterns(restrict_to)?,
            extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
            language_extensions,
        })
    }

    /// Reports whether `path` passes every check.
    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(path)) {
            return false;
        }
        if !self.restrict_to.is_empty() && !self.restrict_to.iter().any(|re| re.is_match(path)) {
            return false;
        }
        let ext = file_extension(path);
        if !self.extensions.is_empty() && !self.extensions.contains(ext) {
            return false;
        }
        if !self.language_extensions.is_empty() && !self.language_extensions.contains(ext) {
            return false;
        }
        true
    }

    /// Keeps the accepted paths, preserving the order of `files`.
    #[must_use]
    pub fn select(&self, files: &[String]) -> Vec<String> {
        let selected: Vec<String> = files
            .iter()
            .filter(|path| self.accepts(path))
            .cloned()
            .collect();
        tracing::debug!(
            tracked = files.len(),
            selected = selected.len(),
            "Selected files for attribution"
        );
        selected
    }
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p.as_ref()).map_err(Into::into))
        .collect()
}
