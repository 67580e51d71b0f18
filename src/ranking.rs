//! Ordering of the per-author summaries.
//!
//! The ranking criterion picks the primary metric; the remaining metrics and
//! finally the author name break ties:
//!
//! | criterion | key chain |
//! |-----------|-----------|
//! | `lines`   | lines ↓, commits ↓, files ↓, name ↑ |
//! | `commits` | commits ↓, lines ↓, files ↓, name ↑ |
//! | `files`   | files ↓, lines ↓, commits ↓, name ↑ |
//!
//! Metrics sort descending, the name ascending. Names are unique, so the chain
//! is a total order and ranking is deterministic.

use crate::aggregate::AuthorAccumulator;
use crate::error::{GitfameError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Statistics of one author, as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    /// Author (or committer) name.
    pub name: String,
    /// Lines currently attributed to the author.
    pub lines: usize,
    /// Distinct commits of the author touching the selected files.
    pub commits: usize,
    /// Distinct selected files the author touched.
    pub files: usize,
}

impl AuthorSummary {
    /// Snapshots an accumulator.
    pub fn from_accumulator(name: &str, acc: &AuthorAccumulator) -> Self {
        Self {
            name: name.to_string(),
            lines: acc.lines,
            commits: acc.commits.len(),
            files: acc.files.len(),
        }
    }
}

/// The user-selected primary ranking metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OrderBy {
    /// Most attributed lines first.
    #[default]
    Lines,
    /// Most commits first.
    Commits,
    /// Most files first.
    Files,
}

impl OrderBy {
    /// The criterion's name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Commits => "commits",
            Self::Files => "files",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = GitfameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "commits" => Ok(Self::Commits),
            "files" => Ok(Self::Files),
            _ => Err(GitfameError::config_error(format!(
                "invalid order '{}': expected one of lines, commits, files",
                s
            ))),
        }
    }
}

/// Sort direction of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smaller values first.
    Ascending,
    /// Larger values first.
    Descending,
}

/// One link of a ranking key chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Attributed lines.
    Lines,
    /// Distinct commits.
    Commits,
    /// Distinct files.
    Files,
    /// Author name.
    Name,
}

impl SortKey {
    /// Each key has a fixed direction: metrics descend, the name ascends.
    pub fn direction(self) -> Direction {
        match self {
            Self::Name => Direction::Ascending,
            Self::Lines | Self::Commits | Self::Files => Direction::Descending,
        }
    }

    fn compare(self, a: &AuthorSummary, b: &AuthorSummary) -> Ordering {
        let ascending = match self {
            Self::Lines => a.lines.cmp(&b.lines),
            Self::Commits => a.commits.cmp(&b.commits),
            Self::Files => a.files.cmp(&b.files),
            Self::Name => a.name.cmp(&b.name),
        };
        match self.direction() {
            Direction::Ascending => ascending,
            Direction::Descending => ascending.reverse(),
        }
    }
}

/// The key chain for a ranking criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: [SortKey; 4],
}

impl SortSpec {
    /// Expands a criterion into its key chain.
    pub fn new(order_by: OrderBy) -> Self {
        let keys = match order_by {
            OrderBy::Lines => [SortKey::Lines, SortKey::Commits, SortKey::Files, SortKey::Name],
            OrderBy::Commits => [SortKey::Commits, SortKey::Lines, SortKey::Files, SortKey::Name],
            OrderBy::Files => [SortKey::Files, SortKey::Lines, SortKey::Commits, SortKey::Name],
        };
        Self { keys }
    }

    /// The keys, most significant first.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compares two summaries; the first key that differs decides.
    pub fn compare(&self, a: &AuthorSummary, b: &AuthorSummary) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Sorts `summaries` in place by `order_by`'s key chain.
pub fn sort_summaries(summaries: &mut [AuthorSummary], order_by: OrderBy) {
    let spec = SortSpec::new(order_by);
    summaries.sort_by(|a, b| spec.compare(a, b));
}

/// Builds the ranked summary list from the aggregated statistics.
///
/// # Examples
///
/// ```
/// use gitfame_core::aggregate::AuthorAccumulator;
/// use gitfame_core::ranking::{rank, OrderBy};
/// use std::collections::HashMap;
///
/// let mut authors = HashMap::new();
/// authors.insert("Bob".to_string(), AuthorAccumulator { lines: 1, ..Default::default() });
/// authors.insert("Alice".to_string(), AuthorAccumulator { lines: 1, ..Default::default() });
///
/// let ranked = rank(&authors, OrderBy::Lines);
/// assert_eq!(ranked[0].name, "Alice");
/// ```
#[must_use]
pub fn rank(authors: &HashMap<String, AuthorAccumulator>, order_by: OrderBy) -> Vec<AuthorSummary> {
    let mut summaries: Vec<AuthorSummary> = authors
        .iter()
        .map(|(name, acc)| AuthorSummary::from_accumulator(name, acc))
        .collect();
    sort_summaries(&mut summaries, order_by);
    summaries
}
