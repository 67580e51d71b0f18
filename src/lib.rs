//! # gitfame - per-contributor statistics from git blame
//!
//! gitfame answers "who wrote the code that is in this tree right now?". For
//! every tracked file selected at a revision it reads the line attribution
//! produced by `git blame` and reports, per author:
//!
//! - **Lines**: lines of the current tree attributed to the author
//! - **Commits**: distinct commits of the author behind those lines
//! - **Files**: distinct files the author has lines in
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line argument parsing
//! - [`config`] - Configuration file loading and merging with CLI arguments
//! - [`error`] - Centralized error types for the crate
//! - [`git_utils`] - The [`VcsBackend`] text contract and its `git` implementation
//! - [`languages`] - Language catalog mapping language names to extensions
//! - [`selector`] - Exclude / restrict-to / extension / language file filters
//! - [`blame`] - Porcelain blame parsing and per-file attribution
//! - [`aggregate`] - Merging per-file tallies into per-author statistics
//! - [`ranking`] - Multi-key ordering of author summaries
//! - [`render`] - Tabular, CSV, JSON, JSON-lines and pretty output
//! - [`report`] - The end-to-end pipeline
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use gitfame_core::{FameReport, FameSettings, GitCli, OrderBy};
//!
//! # fn main() -> gitfame_core::Result<()> {
//! let settings = FameSettings {
//!     order_by: OrderBy::Commits,
//!     extensions: vec![".rs".to_string()],
//!     ..FameSettings::default()
//! };
//!
//! let report = FameReport::new(GitCli::new("."));
//! for author in report.analyze(&settings)? {
//!     println!("{}: {} lines", author.name, author.lines);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All functions that can fail return [`Result<T>`], which is a type alias for
//! `std::result::Result<T, GitfameError>`. See the [`error`] module for details.

// Module declarations
pub mod aggregate;
pub mod blame;
pub mod cli;
pub mod config;
pub mod error;
pub mod git_utils;
pub mod languages;
pub mod ranking;
pub mod render;
pub mod report;
pub mod selector;

// Public API exports
pub use crate::aggregate::{Aggregator, AuthorAccumulator};
pub use crate::blame::{attribute_file, parse_porcelain, Actor, FileTally};
pub use crate::cli::Cli;
pub use crate::ranking::{rank, AuthorSummary, OrderBy};
pub use crate::render::{render, render_to_string, OutputFormat};
pub use crate::report::{FameReport, FameSettings};
pub use crate::selector::FileFilter;

// Config exports
pub use crate::config::{
    load_config, load_config_from_path, merge_args, FiltersConfig, GeneralConfig, GitfameConfig,
    OutputConfig,
};

// Error exports
pub use crate::error::{GitfameError, Result};

// Git utils exports
pub use crate::git_utils::{GitCli, VcsBackend};

// Language exports
pub use crate::languages::{Language, LanguageCatalog};
