//! Configuration file support for gitfame.
//!
//! This module loads settings from TOML files and merges them with
//! command-line arguments. CLI arguments take precedence over config file
//! values, which take precedence over built-in defaults.
//!
//! ```toml
//! [general]
//! revision = "main"
//! jobs = 4
//!
//! [filters]
//! extensions = [".rs"]
//! exclude = ["^vendor/"]
//!
//! [output]
//! order_by = "commits"
//! format = "csv"
//! ```

use crate::blame::Actor;
use crate::cli::Cli;
use crate::error::{GitfameError, Result};
use crate::ranking::OrderBy;
use crate::render::OutputFormat;
use crate::report::FameSettings;
use crate::selector::split_comma_list;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for.
const DEFAULT_CONFIG_FILES: &[&str] = &["Gitfame.toml", ".gitfame.toml", "gitfame.toml"];

/// Main configuration structure representing a gitfame configuration file.
///
/// Configuration files use a merge strategy where:
/// 1. CLI arguments (highest priority)
/// 2. Config file values
/// 3. Default values (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GitfameConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// File selection.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Ranking and output.
    #[serde(default)]
    pub output: OutputConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Revision to analyze.
    pub revision: Option<String>,

    /// Enable verbose output.
    #[serde(default)]
    pub verbose: bool,

    /// Number of threads running git blame.
    pub jobs: Option<usize>,

    /// Custom language catalog, relative to the config file's directory.
    pub languages_file: Option<PathBuf>,
}

/// File selection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    /// Extension allow-list.
    pub extensions: Option<Vec<String>>,

    /// Language names.
    pub languages: Option<Vec<String>>,

    /// Exclude patterns.
    pub exclude: Option<Vec<String>>,

    /// Restrict-to patterns.
    pub restrict_to: Option<Vec<String>>,
}

/// Ranking and output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Ranking criterion: `lines`, `commits` or `files`.
    pub order_by: Option<String>,

    /// Output format: `tabular`, `csv`, `json`, `json-lines` or `pretty`.
    pub format: Option<String>,

    /// Credit the committer instead of the author.
    #[serde(default)]
    pub use_committer: bool,
}

/// Load configuration from a specific file path.
///
/// # Returns
///
/// Returns `Ok(None)` if the file doesn't exist and an error if the file
/// exists but cannot be read or parsed.
pub fn load_config_from_path(path: &Path) -> Result<Option<GitfameConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;

    let config: GitfameConfig = toml::from_str(&content).map_err(|e| {
        GitfameError::config_error_with_path(format!("Failed to parse TOML: {}", e), path.to_path_buf())
    })?;

    Ok(Some(config))
}

/// Discover and load configuration, searching `start` and its ancestors.
///
/// In each directory the names `Gitfame.toml`, `.gitfame.toml` and
/// `gitfame.toml` are tried in that order; the first file found wins.
pub fn discover_and_load_config(start: &Path) -> Result<Option<(PathBuf, GitfameConfig)>> {
    let mut current_dir = match start.canonicalize() {
        Ok(dir) => dir,
        Err(_) => std::env::current_dir()?.join(start),
    };

    loop {
        for config_name in DEFAULT_CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if let Some(config) = load_config_from_path(&config_path)? {
                tracing::debug!(path = %config_path.display(), "Loaded config file");
                return Ok(Some((config_path, config)));
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Ok(None)
}

/// Load configuration from a specified path or discover it from `start`.
pub fn load_config(
    config_path: Option<&Path>,
    start: &Path,
) -> Result<Option<(PathBuf, GitfameConfig)>> {
    if let Some(path) = config_path {
        load_config_from_path(path).map(|opt| opt.map(|config| (path.to_path_buf(), config)))
    } else {
        discover_and_load_config(start)
    }
}

/// Merge CLI args with config file values into the settings of one run.
///
/// `config_path` is the file `config` was read from; relative paths inside
/// the file are resolved against its directory.
///
/// # Errors
///
/// Fails if the config names an unknown ranking criterion or format, or if the
/// resulting job count is zero.
pub fn merge_args(
    cli: &Cli,
    config: &GitfameConfig,
    config_path: Option<&Path>,
) -> Result<FameSettings> {
    let order_by = match (cli.order_by, &config.output.order_by) {
        (Some(order_by), _) => order_by,
        (None, Some(name)) => name.parse::<OrderBy>()?,
        (None, None) => OrderBy::default(),
    };

    let format = match (cli.format, &config.output.format) {
        (Some(format), _) => format,
        (None, Some(name)) => name.parse::<OutputFormat>()?,
        (None, None) => OutputFormat::default(),
    };

    let jobs = cli
        .jobs
        .or(config.general.jobs)
        .unwrap_or_else(num_cpus::get);
    if jobs == 0 {
        return Err(GitfameError::invalid_input_with_arg(
            "jobs must be at least 1",
            "jobs",
        ));
    }

    let config_dir = config_path.and_then(Path::parent);
    let languages_file = cli.languages_file.clone().or_else(|| {
        config.general.languages_file.as_ref().map(|file| match config_dir {
            Some(dir) => dir.join(file),
            None => file.clone(),
        })
    });

    Ok(FameSettings {
        repository: cli.repository.clone(),
        revision: cli
            .revision
            .clone()
            .or_else(|| config.general.revision.clone())
            .unwrap_or_else(|| "HEAD".to_string()),
        order_by,
        format,
        actor: Actor::from_use_committer(cli.use_committer || config.output.use_committer),
        extensions: merge_list(&cli.extensions, &config.filters.extensions),
        languages: merge_list(&cli.languages, &config.filters.languages),
        exclude: merge_list(&cli.exclude, &config.filters.exclude),
        restrict_to: merge_list(&cli.restrict_to, &config.filters.restrict_to),
        languages_file,
        jobs,
        verbose: cli.verbose || config.general.verbose,
    })
}

/// The CLI list when the flag was given, otherwise the config list.
fn merge_list(cli_value: &Option<String>, config_value: &Option<Vec<String>>) -> Vec<String> {
    match (cli_value, config_value) {
        (Some(value), _) => split_comma_list(value),
        (None, Some(list)) => list.clone(),
        (None, None) => Vec::new(),
    }
}
