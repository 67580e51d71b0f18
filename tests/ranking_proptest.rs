//! Property-based tests for aggregation and ranking.
//!
//! This module uses proptest to verify that ranking is a deterministic total
//! order, that the aggregated result does not depend on the order files are
//! merged in, and that the JSON rendering round-trips.

use gitfame_core::ranking::SortSpec;
use gitfame_core::{
    rank, render_to_string, Aggregator, AuthorAccumulator, AuthorSummary, FileTally, OrderBy,
    OutputFormat,
};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

fn any_order_by() -> impl Strategy<Value = OrderBy> {
    prop_oneof![
        Just(OrderBy::Lines),
        Just(OrderBy::Commits),
        Just(OrderBy::Files),
    ]
}

fn any_accumulator() -> impl Strategy<Value = AuthorAccumulator> {
    (
        0usize..500,
        prop::collection::hash_set("[0-9a-f]{3}", 0..4),
        prop::collection::hash_set("[a-z]{1,3}\\.rs", 0..4),
    )
        .prop_map(|(lines, commits, files)| AuthorAccumulator {
            commits,
            files,
            lines,
        })
}

fn any_authors() -> impl Strategy<Value = HashMap<String, AuthorAccumulator>> {
    prop::collection::hash_map("[A-Za-z]{1,6}", any_accumulator(), 0..12)
}

/// Per-file tallies over a small pool of authors so that merges collide.
fn any_tallies() -> impl Strategy<Value = Vec<FileTally>> {
    let credit = ("(Ann|Ben|Cat|Dan)", "c[0-4]", 0usize..20);
    prop::collection::vec(
        ("[a-d]{1,2}\\.go", prop::collection::vec(credit, 0..4)),
        0..10,
    )
    .prop_map(|files| {
        files
            .into_iter()
            .map(|(path, credits)| {
                let mut tally = FileTally::new(path);
                for (author, commit, lines) in credits {
                    tally.credit(&author, &commit, lines);
                }
                tally
            })
            .collect()
    })
}

fn ranked_after_merging(tallies: Vec<FileTally>, order_by: OrderBy) -> Vec<AuthorSummary> {
    let mut aggregator = Aggregator::new();
    aggregator.merge_all(tallies);
    rank(aggregator.authors(), order_by)
}

proptest! {
    /// Property: ranking the same state twice yields identical sequences.
    #[test]
    fn prop_rank_is_deterministic(authors in any_authors(), order_by in any_order_by()) {
        prop_assert_eq!(rank(&authors, order_by), rank(&authors, order_by));
    }

    /// Property: the ranked sequence is strictly increasing under the key chain.
    #[test]
    fn prop_rank_is_strict_total_order(authors in any_authors(), order_by in any_order_by()) {
        let ranked = rank(&authors, order_by);
        let spec = SortSpec::new(order_by);

        prop_assert_eq!(ranked.len(), authors.len());
        for pair in ranked.windows(2) {
            prop_assert_eq!(spec.compare(&pair[0], &pair[1]), Ordering::Less);
        }
    }

    /// Property: summaries report the sizes of the distinct sets.
    #[test]
    fn prop_rank_counts_distinct_sets(authors in any_authors(), order_by in any_order_by()) {
        for summary in rank(&authors, order_by) {
            let acc = &authors[&summary.name];
            prop_assert_eq!(summary.lines, acc.lines);
            prop_assert_eq!(summary.commits, acc.commits.len());
            prop_assert_eq!(summary.files, acc.files.len());
        }
    }

    /// Property: merging tallies in reverse order yields the same ranking.
    #[test]
    fn prop_merge_order_does_not_change_ranking(
        tallies in any_tallies(),
        order_by in any_order_by()
    ) {
        let reversed: Vec<FileTally> = tallies.iter().rev().cloned().collect();
        prop_assert_eq!(
            ranked_after_merging(tallies, order_by),
            ranked_after_merging(reversed, order_by)
        );
    }

    /// Property: credited lines are preserved by aggregation.
    #[test]
    fn prop_merge_preserves_total_lines(tallies in any_tallies()) {
        let expected: usize = tallies.iter().map(FileTally::total_lines).sum();
        let ranked = ranked_after_merging(tallies, OrderBy::Lines);
        prop_assert_eq!(ranked.iter().map(|s| s.lines).sum::<usize>(), expected);
    }

    /// Property: rendering to JSON and parsing back reproduces the sequence.
    #[test]
    fn prop_json_round_trip(authors in any_authors(), order_by in any_order_by()) {
        let ranked = rank(&authors, order_by);
        let json = render_to_string(OutputFormat::Json, &ranked).unwrap();
        let parsed: Vec<AuthorSummary> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, ranked);
    }
}
