//! Attribution of one file's lines to authors.
//!
//! The input is `git blame --porcelain` output. Every group of lines starts with
//! a header `<commit> <original-line> <final-line> <group-size>` followed by the
//! group's lines, each emitted as a tab-prefixed content line (possibly preceded
//! by a three-field header for lines after the first). The first time a commit
//! appears in a file, its metadata (`author`, `committer`, `summary`, ...) sits
//! between the header and the content; later groups from the same commit omit it.
//!
//! The parser therefore keeps a per-file cache from commit id to the actor
//! resolved at its first appearance and credits later groups from the cache.
//!
//! ```text
//! 3f1c... 1 1 2          <- header, group of 2 lines
//! author Alice           <- metadata, first appearance only
//! committer Carol
//! filename src/a.go
//! <TAB>package a
//! 3f1c... 2 2            <- header of the second line in the group
//! <TAB>
//! 9ab2... 3 3 1
//! author Bob
//! ...
//! ```
//!
//! Files that blame to nobody (empty or binary files) are credited to the
//! author of the last commit touching them, contributing the file and the commit
//! but no lines.

use crate::error::{GitfameError, Result};
use crate::git_utils::VcsBackend;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use tracing::instrument;

/// Which identity of a commit gets credit for its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Actor {
    /// The commit author (`author` metadata key).
    #[default]
    Author,
    /// The commit committer (`committer` metadata key).
    Committer,
}

impl Actor {
    /// Picks the actor from a `--use-committer` style flag.
    pub fn from_use_committer(use_committer: bool) -> Self {
        if use_committer {
            Self::Committer
        } else {
            Self::Author
        }
    }

    /// The porcelain metadata key carrying this actor's name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Committer => "committer",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What one author contributed to one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorTally {
    /// Lines of the file attributed to the author.
    pub lines: usize,
    /// Distinct commits of the author seen in the file.
    pub commits: BTreeSet<String>,
}

/// Per-file attribution result, merged into the global statistics afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTally {
    /// Path of the file, relative to the repository root.
    pub path: String,
    /// Contributions keyed by actor name.
    pub authors: BTreeMap<String, AuthorTally>,
}

impl FileTally {
    /// An empty tally for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            authors: BTreeMap::new(),
        }
    }

    /// True when nobody has been credited for the file.
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Sum of the lines credited across all authors.
    pub fn total_lines(&self) -> usize {
        self.authors.values().map(|a| a.lines).sum()
    }

    /// Credits `author` with `commit` and `lines` more lines.
    pub fn credit(&mut self, author: &str, commit: &str, lines: usize) {
        let entry = self.authors.entry(author.to_string()).or_default();
        entry.commits.insert(commit.to_string());
        entry.lines += lines;
    }

    fn credit_lines(&mut self, author: &str, lines: usize) {
        self.authors.entry(author.to_string()).or_default().lines += lines;
    }
}

/// Parses porcelain blame output for `path`, crediting lines to `actor`.
///
/// Malformed headers are tolerated: a missing or non-numeric group size counts
/// as zero and truncated input simply ends the scan.
///
/// # Examples
///
/// ```
/// use gitfame_core::blame::{parse_porcelain, Actor};
///
/// let dump = "c1 1 1 1\nauthor Alice\ncommitter Bob\n\tfn main() {}\n";
/// let tally = parse_porcelain("main.rs", dump, Actor::Author);
/// assert_eq!(tally.authors["Alice"].lines, 1);
/// ```
#[must_use]
pub fn parse_porcelain(path: &str, dump: &str, actor: Actor) -> FileTally {
    let key = actor.key();
    let mut tally = FileTally::new(path);
    let mut actor_by_commit: HashMap<&str, String> = HashMap::new();
    let mut lines = dump.lines();

    while let Some(header) = lines.next() {
        let mut fields = header.split(' ');
        let commit = fields.next().unwrap_or_default();
        let group_size = fields
            .nth(2)
            .and_then(|count| count.trim().parse::<usize>().ok())
            .unwrap_or(0);

        // Repeat-suppressed group: metadata was already seen for this commit.
        let mut resolved = actor_by_commit.contains_key(commit);
        if let Some(name) = actor_by_commit.get(commit) {
            tally.credit_lines(name, group_size);
        }

        let mut content_lines = 0;
        while content_lines < group_size {
            let Some(line) = lines.next() else {
                break;
            };
            if line.starts_with('\t') {
                content_lines += 1;
                continue;
            }
            if resolved {
                continue;
            }
            if let Some(name) = metadata_value(line, key) {
                actor_by_commit.insert(commit, name.to_string());
                tally.credit(name, commit, group_size);
                resolved = true;
            }
        }
    }

    tally
}

/// Returns the value of a `<key> <value>` metadata line when its key is `key`.
fn metadata_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let (line_key, value) = match line.split_once(' ') {
        Some((k, v)) => (k, v),
        None => (line, ""),
    };
    (line_key == key).then(|| value.trim())
}

/// Parses the `<commit-id>,<author-name>` answer of a last-commit query.
///
/// The answer is split at its first comma, so author names containing commas
/// survive.
///
/// # Errors
///
/// Returns a [`GitfameError::ParseError`] if the answer contains no comma.
pub fn parse_last_commit(path: &str, answer: &str) -> Result<(String, String)> {
    let answer = answer.trim();
    match answer.split_once(',') {
        Some((commit, author)) => Ok((commit.to_string(), author.to_string())),
        None => Err(GitfameError::parse_error_with_file(
            path,
            format!("unexpected output format: {}", answer),
        )),
    }
}

/// Attributes one file at `revision`, falling back to its last commit when
/// blame credits nobody.
///
/// # Errors
///
/// Fails if either git query fails or the fallback answer is malformed.
#[instrument(skip(backend), level = "debug")]
pub fn attribute_file<B: VcsBackend + ?Sized>(
    backend: &B,
    revision: &str,
    path: &str,
    actor: Actor,
) -> Result<FileTally> {
    let dump = backend.blame(revision, path)?;
    let mut tally = parse_porcelain(path, &dump, actor);

    if tally.is_empty() {
        let answer = backend.last_commit(revision, path)?;
        let (commit, author) = parse_last_commit(path, &answer)?;
        tracing::debug!(
            path,
            commit = %commit,
            author = %author,
            "No attributable lines, crediting last commit"
        );
        tally.credit(&author, &commit, 0);
    } else {
        tracing::debug!(
            path,
            authors = tally.authors.len(),
            lines = tally.total_lines(),
            "Attributed file"
        );
    }

    Ok(tally)
}
