//! The gitfame run: list, select, attribute, aggregate, rank and render.
//!
//! # Example
//!
//! ```rust,no_run
//! use gitfame_core::{FameReport, FameSettings, GitCli};
//!
//! # fn main() -> gitfame_core::Result<()> {
//! let settings = FameSettings {
//!     repository: ".".into(),
//!     ..FameSettings::default()
//! };
//! let report = FameReport::new(GitCli::new(&settings.repository));
//! report.run(&settings)?;
//! # Ok(())
//! # }
//! ```

use crate::aggregate::Aggregator;
use crate::blame::{attribute_file, Actor, FileTally};
use crate::error::{GitfameError, Result};
use crate::git_utils::{parse_file_listing, VcsBackend};
use crate::languages::LanguageCatalog;
use crate::ranking::{rank, AuthorSummary, OrderBy};
use crate::render::{render, OutputFormat};
use crate::selector::FileFilter;
use rayon::prelude::*;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use tracing::instrument;

/// Fully merged settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FameSettings {
    /// Repository directory.
    pub repository: PathBuf,
    /// Revision whose tree is analyzed.
    pub revision: String,
    /// Ranking criterion.
    pub order_by: OrderBy,
    /// Output encoding.
    pub format: OutputFormat,
    /// Who gets credit for a line.
    pub actor: Actor,
    /// Extension allow-list, e.g. `.go`.
    pub extensions: Vec<String>,
    /// Language names resolved through the catalog.
    pub languages: Vec<String>,
    /// Exclude patterns.
    pub exclude: Vec<String>,
    /// Restrict-to patterns.
    pub restrict_to: Vec<String>,
    /// Custom language catalog; the embedded one is used when `None`.
    pub languages_file: Option<PathBuf>,
    /// Worker threads for attribution.
    pub jobs: usize,
    /// Debug logging.
    pub verbose: bool,
}

impl Default for FameSettings {
    fn default() -> Self {
        Self {
            repository: PathBuf::from("."),
            revision: "HEAD".to_string(),
            order_by: OrderBy::default(),
            format: OutputFormat::default(),
            actor: Actor::default(),
            extensions: Vec::new(),
            languages: Vec::new(),
            exclude: Vec::new(),
            restrict_to: Vec::new(),
            languages_file: None,
            jobs: num_cpus::get(),
            verbose: false,
        }
    }
}

/// Computes and renders per-author statistics over a [`VcsBackend`].
pub struct FameReport<B: VcsBackend> {
    backend: B,
}

impl<B: VcsBackend> FameReport<B> {
    /// Creates a report over `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The backend queries run against.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Compiles the file filter, resolving language names when any are given.
    pub fn build_filter(&self, settings: &FameSettings) -> Result<FileFilter> {
        let language_extensions = if settings.languages.is_empty() {
            HashSet::new()
        } else {
            let catalog = LanguageCatalog::load(settings.languages_file.as_deref())?;
            let resolved = catalog.resolve_extensions(&settings.languages);
            if resolved.is_empty() {
                tracing::warn!(
                    languages = ?settings.languages,
                    "None of the requested languages are in the catalog"
                );
            }
            resolved
        };

        FileFilter::new(
            &settings.exclude,
            &settings.restrict_to,
            &settings.extensions,
            language_extensions,
        )
    }

    /// Runs the pipeline and returns the ranked summaries without rendering.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings or on the first failed git query; no partial
    /// result is returned.
    #[instrument(skip(self, settings), fields(revision = %settings.revision))]
    pub fn analyze(&self, settings: &FameSettings) -> Result<Vec<AuthorSummary>> {
        if settings.jobs == 0 {
            return Err(GitfameError::invalid_input_with_arg(
                "jobs must be at least 1",
                "jobs",
            ));
        }

        let filter = self.build_filter(settings)?;
        let listing = self.backend.list_tracked_files(&settings.revision)?;
        let tracked = parse_file_listing(&listing);
        let selected = filter.select(&tracked);

        let tallies = self.attribute_all(&selected, settings)?;

        let mut aggregator = Aggregator::new();
        aggregator.merge_all(tallies);

        let summaries = rank(aggregator.authors(), settings.order_by);
        tracing::info!(
            tracked = tracked.len(),
            selected = selected.len(),
            authors = summaries.len(),
            "Computed author statistics"
        );
        Ok(summaries)
    }

    /// Attributes every file, returning the tallies in `files` order.
    ///
    /// With more than one job the files are spread over a dedicated rayon pool.
    /// The first failure wins and the remaining results are discarded.
    pub fn attribute_all(&self, files: &[String], settings: &FameSettings) -> Result<Vec<FileTally>> {
        let revision = settings.revision.as_str();
        let actor = settings.actor;

        if settings.jobs <= 1 || files.len() <= 1 {
            return files
                .iter()
                .map(|path| attribute_file(&self.backend, revision, path, actor))
                .collect();
        }

        tracing::debug!(jobs = settings.jobs, files = files.len(), "Attributing files in parallel");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.jobs)
            .build()?;
        pool.install(|| {
            files
                .par_iter()
                .map(|path| attribute_file(&self.backend, revision, path, actor))
                .collect()
        })
    }

    /// Renders the statistics into `out`.
    pub fn report_to<W: Write>(&self, settings: &FameSettings, out: &mut W) -> Result<()> {
        let summaries = self.analyze(settings)?;
        render(settings.format, &summaries, out)
    }

    /// Renders the statistics to standard output.
    pub fn run(&self, settings: &FameSettings) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.report_to(settings, &mut out)?;
        out.flush().map_err(|e| {
            GitfameError::render_error(settings.format.as_str(), format!("Failed to flush output: {}", e))
        })
    }
}
