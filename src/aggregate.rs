//! Accumulation of per-file tallies into per-author statistics.
//!
//! The [`Aggregator`] is the single owner of the global author map. Per-file
//! results are produced independently (possibly in parallel) and handed to
//! [`Aggregator::merge`] one at a time. Merging only inserts into sets and adds
//! line counts, so the result does not depend on the order of merges.

use crate::blame::FileTally;
use std::collections::{HashMap, HashSet};

/// Running statistics of one author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorAccumulator {
    /// Distinct commit ids credited to the author.
    pub commits: HashSet<String>,
    /// Distinct file paths credited to the author.
    pub files: HashSet<String>,
    /// Total attributed lines.
    pub lines: usize,
}

/// Owner of the author → statistics map.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    authors: HashMap<String, AuthorAccumulator>,
}

impl Aggregator {
    /// An empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one file's tally into the statistics.
    pub fn merge(&mut self, tally: FileTally) {
        let FileTally { path, authors } = tally;
        for (name, contribution) in authors {
            let acc = self.authors.entry(name).or_default();
            acc.lines += contribution.lines;
            acc.commits.extend(contribution.commits);
            acc.files.insert(path.clone());
        }
    }

    /// Merges every tally in iteration order.
    pub fn merge_all(&mut self, tallies: impl IntoIterator<Item = FileTally>) {
        for tally in tallies {
            self.merge(tally);
        }
    }

    /// The accumulated statistics keyed by author name.
    pub fn authors(&self) -> &HashMap<String, AuthorAccumulator> {
        &self.authors
    }

    /// Statistics of one author.
    pub fn get(&self, name: &str) -> Option<&AuthorAccumulator> {
        self.authors.get(name)
    }

    /// Number of distinct authors seen.
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    /// True when no file has been credited to anybody.
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(path: &str, credits: &[(&str, &str, usize)]) -> FileTally {
        let mut tally = FileTally::new(path);
        for (author, commit, lines) in credits {
            tally.credit(author, commit, *lines);
        }
        tally
    }

    #[test]
    fn test_merge_accumulates_lines_across_files() {
        let mut agg = Aggregator::new();
        agg.merge(tally("a.go", &[("Alice", "c1", 10)]));
        agg.merge(tally("b.go", &[("Alice", "c2", 5)]));

        let alice = agg.get("Alice").expect("Alice should be present");
        assert_eq!(alice.lines, 15);
        assert_eq!(alice.files.len(), 2);
        assert_eq!(alice.commits.len(), 2);
    }

    #[test]
    fn test_merge_deduplicates_commits_across_files() {
        let mut agg = Aggregator::new();
        agg.merge(tally("a.go", &[("Alice", "c1", 1)]));
        agg.merge(tally("b.go", &[("Alice", "c1", 1)]));

        assert_eq!(
            agg.get("Alice").unwrap().commits.len(),
            1,
            "one commit touching two files counts once"
        );
    }

    #[test]
    fn test_merge_same_file_twice_counts_file_once() {
        let mut agg = Aggregator::new();
        agg.merge(tally("a.go", &[("Alice", "c1", 1)]));
        agg.merge(tally("a.go", &[("Alice", "c2", 1)]));

        assert_eq!(agg.get("Alice").unwrap().files.len(), 1);
    }

    #[test]
    fn test_merge_zero_line_fallback_credit() {
        let mut agg = Aggregator::new();
        agg.merge(tally("empty.txt", &[("Bob", "c9", 0)]));

        let bob = agg.get("Bob").unwrap();
        assert_eq!(bob.lines, 0);
        assert!(bob.files.contains("empty.txt"));
        assert!(bob.commits.contains("c9"));
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let tallies = vec![
            tally("a.go", &[("Alice", "c1", 3), ("Bob", "c2", 1)]),
            tally("b.go", &[("Bob", "c2", 4)]),
            tally("c.go", &[("Alice", "c3", 2)]),
        ];

        let mut forward = Aggregator::new();
        forward.merge_all(tallies.clone());
        let mut backward = Aggregator::new();
        backward.merge_all(tallies.into_iter().rev());

        assert_eq!(forward.authors(), backward.authors());
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn test_new_aggregator_is_empty() {
        assert!(Aggregator::new().is_empty());
    }
}
