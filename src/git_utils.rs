//! Git access for gitfame.
//!
//! gitfame never looks inside the object database itself. Everything it knows
//! about a repository comes from three line-oriented git queries, abstracted by
//! the [`VcsBackend`] trait so the attribution pipeline can be driven by any
//! source of equivalent text (tests use in-memory backends):
//!
//! - `git ls-tree` to list the tracked files at a revision,
//! - `git blame --porcelain` for the per-line attribution dump of one file,
//! - `git log -1` for the last commit touching a file.

use crate::error::{GitfameError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::instrument;

/// The text contract gitfame needs from a version-control system.
///
/// Implementations return the raw output of each query. Any failure (the query
/// could not run, exited unsuccessfully, or reported an error) must be returned
/// as an `Err`; callers treat it as fatal for the whole run.
pub trait VcsBackend: Sync {
    /// Lists the files tracked at `revision`, one relative path per line.
    fn list_tracked_files(&self, revision: &str) -> Result<String>;

    /// Returns the porcelain line-attribution dump of `path` at `revision`.
    ///
    /// The dump carries both `author` and `committer` metadata keys; choosing
    /// between them is the parser's job.
    fn blame(&self, revision: &str, path: &str) -> Result<String>;

    /// Returns `<commit-id>,<author-name>` for the most recent commit at or
    /// before `revision` that touched `path`.
    fn last_commit(&self, revision: &str, path: &str) -> Result<String>;
}

/// [`VcsBackend`] that runs the `git` executable inside a repository directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    /// Creates a backend for the repository at `repo`.
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// The repository directory git commands run in.
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Runs `git <args>` and returns stdout.
    ///
    /// A non-zero exit is always an error. When `reject_stderr` is set, any
    /// non-blank stderr output is an error too.
    fn run_git(&self, operation: &str, args: &[&str], reject_stderr: bool) -> Result<String> {
        let output = Command::new("git")
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .current_dir(&self.repo)
            .output()
            .map_err(|e| GitfameError::git_spawn_failed(operation, self.repo.clone(), e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || (reject_stderr && !stderr.trim().is_empty()) {
            tracing::error!(
                operation,
                status = %output.status,
                "git command failed. Stderr:\n{}",
                stderr
            );
            return Err(GitfameError::git_command_failed(
                operation,
                self.repo.clone(),
                stderr.into_owned(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsBackend for GitCli {
    #[instrument(skip(self), level = "debug")]
    fn list_tracked_files(&self, revision: &str) -> Result<String> {
        self.run_git(
            "ls-tree",
            &["ls-tree", "-r", revision, "--name-only", "--full-name", "."],
            false,
        )
    }

    #[instrument(skip(self), level = "debug")]
    fn blame(&self, revision: &str, path: &str) -> Result<String> {
        self.run_git("blame", &["blame", "--porcelain", revision, "--", path], true)
    }

    #[instrument(skip(self), level = "debug")]
    fn last_commit(&self, revision: &str, path: &str) -> Result<String> {
        self.run_git(
            "log",
            &["log", "-1", "--pretty=format:%H,%an", revision, "--", path],
            false,
        )
    }
}

/// Splits a `list_tracked_files` answer into paths, dropping blank lines.
///
/// # Examples
///
/// ```
/// use gitfame_core::git_utils::parse_file_listing;
///
/// let files = parse_file_listing("src/main.rs\nREADME.md\n\n");
/// assert_eq!(files, vec!["src/main.rs", "README.md"]);
/// ```
#[must_use]
pub fn parse_file_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
