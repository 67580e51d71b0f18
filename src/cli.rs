use crate::ranking::OrderBy;
use crate::render::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for `gitfame`.
///
/// Options that can also come from a config file are `Option`s, so an absent
/// flag can be told apart from one set to its default value.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gitfame",
    version,
    about = "Per-contributor line, commit and file statistics from git blame"
)]
pub struct Cli {
    /// Repository directory to analyze.
    #[arg(short, long, default_value = ".")]
    pub repository: PathBuf,

    /// Revision whose tree is analyzed. Defaults to HEAD.
    #[arg(long)]
    pub revision: Option<String>,

    /// Ranking criterion. Defaults to lines.
    #[arg(long, value_enum, ignore_case = true)]
    pub order_by: Option<OrderBy>,

    /// Credit the committer instead of the author.
    #[arg(long)]
    pub use_committer: bool,

    /// Output format. Defaults to tabular.
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Comma-separated extension allow-list, e.g. `.go,.md`.
    #[arg(long)]
    pub extensions: Option<String>,

    /// Comma-separated language names, e.g. `go,markdown`.
    #[arg(long)]
    pub languages: Option<String>,

    /// Comma-separated regular expressions; matching paths are skipped.
    #[arg(long)]
    pub exclude: Option<String>,

    /// Comma-separated regular expressions; only matching paths are kept.
    #[arg(long)]
    pub restrict_to: Option<String>,

    /// JSON language catalog replacing the built-in one.
    #[arg(long)]
    pub languages_file: Option<PathBuf>,

    /// Number of threads running git blame. Defaults to the CPU count.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Configuration file. Discovered from the repository upwards when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
