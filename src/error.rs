//! Error types for gitfame.
//!
//! Every failure in gitfame is terminal for the run: configuration problems are
//! detected before any git query executes, and a failing git query or a malformed
//! fallback answer aborts the whole analysis so that no partial statistics are
//! ever rendered. This module provides the single error type carrying those
//! failure modes, plus conversions from the libraries the crate builds on.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The main error type for gitfame operations.
///
/// `GitfameError` provides specific error variants for different failure modes,
/// making it possible to programmatically handle different error cases.
#[derive(Debug)]
pub enum GitfameError {
    /// Invalid settings: unknown ranking criterion or output format, a bad
    /// regular expression, an unreadable config or language catalog.
    ConfigError {
        /// Description of the configuration issue.
        message: String,
        /// The config file path, if applicable.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A git query failed to spawn, exited non-zero, or wrote to stderr.
    GitError {
        /// The git operation being performed.
        operation: String,
        /// The repository the query ran in.
        repo_path: Option<PathBuf>,
        /// Whatever git printed on stderr.
        stderr: Option<String>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Output from git did not have the expected shape.
    ParseError {
        /// The tracked file whose output failed to parse.
        file: Option<String>,
        /// Context about what was being parsed.
        context: String,
    },

    /// An error occurred during file system operations.
    IoError {
        /// The operation being performed.
        operation: String,
        /// The path involved in the error.
        path: Option<PathBuf>,
        /// The underlying IO error.
        source: Option<io::Error>,
    },

    /// Writing the rendered statistics failed.
    RenderError {
        /// The output format being written.
        format: String,
        /// Description of what went wrong.
        message: String,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error indicating an invalid argument or input.
    InvalidInput {
        /// Description of the invalid input.
        message: String,
        /// The argument or value that was invalid.
        argument: Option<String>,
    },
}

impl GitfameError {
    /// Creates a new `ConfigError` with the given message.
    ///
    /// # Examples
    /// ```
    /// use gitfame_core::error::GitfameError;
    ///
    /// let err = GitfameError::config_error("invalid order");
    /// assert_eq!(err.name(), "ConfigError");
    /// ```
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates a new `ConfigError` pointing at a file.
    pub fn config_error_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `GitError` with the given operation description.
    pub fn git_error(operation: impl Into<String>) -> Self {
        Self::GitError {
            operation: operation.into(),
            repo_path: None,
            stderr: None,
            source: None,
        }
    }

    /// Creates a new `GitError` for a git command that ran but failed.
    ///
    /// # Arguments
    /// * `operation` - A description of the Git operation being performed.
    /// * `repo_path` - The repository the command ran in.
    /// * `stderr` - The text git wrote to stderr.
    pub fn git_command_failed(
        operation: impl Into<String>,
        repo_path: PathBuf,
        stderr: impl Into<String>,
    ) -> Self {
        Self::GitError {
            operation: operation.into(),
            repo_path: Some(repo_path),
            stderr: Some(stderr.into()),
            source: None,
        }
    }

    /// Creates a new `GitError` for a git command that could not be spawned.
    pub fn git_spawn_failed(operation: impl Into<String>, repo_path: PathBuf, err: io::Error) -> Self {
        Self::GitError {
            operation: operation.into(),
            repo_path: Some(repo_path),
            stderr: None,
            source: Some(Box::new(err)),
        }
    }

    /// Creates a new `ParseError` for output belonging to a tracked file.
    pub fn parse_error_with_file(file: impl Into<String>, context: impl Into<String>) -> Self {
        Self::ParseError {
            file: Some(file.into()),
            context: context.into(),
        }
    }

    /// Creates a new `IoError` with a path and underlying error.
    pub fn io_error_with_source(
        operation: impl Into<String>,
        path: PathBuf,
        source: io::Error,
    ) -> Self {
        Self::IoError {
            operation: operation.into(),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Creates a new `RenderError` for the given output format.
    pub fn render_error(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderError {
            format: format.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new `InvalidInput` error with an argument name.
    pub fn invalid_input_with_arg(message: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            argument: Some(argument.into()),
        }
    }

    /// Returns the name of the error variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfigError { .. } => "ConfigError",
            Self::GitError { .. } => "GitError",
            Self::ParseError { .. } => "ParseError",
            Self::IoError { .. } => "IoError",
            Self::RenderError { .. } => "RenderError",
            Self::InvalidInput { .. } => "InvalidInput",
        }
    }

    /// Returns suggested recovery actions for the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { path, .. } => {
                let mut s = vec![
                    "Use one of 'lines', 'commits', 'files' for the ranking criterion".to_string(),
                    "Use one of 'tabular', 'csv', 'json', 'json-lines', 'pretty' for the format"
                        .to_string(),
                    "Check that exclude and restrict-to patterns are valid regular expressions"
                        .to_string(),
                ];
                if path.is_some() {
                    s.push("Check the configuration file syntax (TOML)".to_string());
                }
                s
            }
            Self::GitError { .. } => vec![
                "Ensure the path is a valid Git repository".to_string(),
                "Check that the revision exists".to_string(),
                "Verify Git is installed and accessible".to_string(),
            ],
            Self::ParseError { .. } => vec![
                "Verify the installed Git produces standard `log --pretty` output".to_string(),
            ],
            Self::IoError { .. } => vec![
                "Check that the path exists and is accessible".to_string(),
                "Verify you have the necessary permissions".to_string(),
            ],
            Self::RenderError { .. } => {
                vec!["Check that standard output is writable (e.g. not a closed pipe)".to_string()]
            }
            Self::InvalidInput { .. } => vec![
                "Review the command-line arguments".to_string(),
                "Run with --help for valid input formats".to_string(),
            ],
        }
    }
}

impl fmt::Display for GitfameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Configuration error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::GitError {
                operation,
                repo_path,
                stderr,
                ..
            } => {
                match repo_path {
                    Some(path) => write!(
                        f,
                        "Git error during '{}' at '{}'",
                        operation,
                        path.display()
                    )?,
                    None => write!(f, "Git error during '{}'", operation)?,
                }
                match stderr.as_deref().map(str::trim) {
                    Some(text) if !text.is_empty() => write!(f, ": {}", text),
                    _ => write!(f, ": operation failed"),
                }
            }
            Self::ParseError { file, context } => {
                if let Some(file) = file {
                    write!(f, "Parse error for '{}': {}", file, context)
                } else {
                    write!(f, "Parse error: {}", context)
                }
            }
            Self::IoError {
                operation, path, ..
            } => {
                if let Some(p) = path {
                    write!(
                        f,
                        "IO error during '{}' at '{}': operation failed",
                        operation,
                        p.display()
                    )
                } else {
                    write!(f, "IO error during '{}': operation failed", operation)
                }
            }
            Self::RenderError {
                format, message, ..
            } => {
                write!(f, "Failed to render {} output: {}", format, message)
            }
            Self::InvalidInput { message, argument } => {
                if let Some(arg) = argument {
                    write!(f, "Invalid input '{}': {}", arg, message)
                } else {
                    write!(f, "Invalid input: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for GitfameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::GitError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::ParseError { .. } => None,
            Self::IoError { source, .. } => source.as_ref().map(|e| e as _),
            Self::RenderError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::InvalidInput { .. } => None,
        }
    }
}

// Implement From conversions for common error types

impl From<io::Error> for GitfameError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            operation: "file operation".to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<toml::de::Error> for GitfameError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for GitfameError {
    fn from(err: serde_json::Error) -> Self {
        Self::RenderError {
            format: "json".to_string(),
            message: format!("Failed to serialize JSON: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for GitfameError {
    fn from(err: csv::Error) -> Self {
        Self::RenderError {
            format: "csv".to_string(),
            message: format!("Failed to write CSV: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<regex::Error> for GitfameError {
    fn from(err: regex::Error) -> Self {
        Self::ConfigError {
            message: format!("Invalid path pattern: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for GitfameError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ConfigError {
            message: format!("Failed to start worker pool: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

/// A type alias for `Result<T, GitfameError>`.
///
/// This is the recommended return type for functions that can fail with gitfame-specific errors.
pub type Result<T> = std::result::Result<T, GitfameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_creates_basic_error() {
        let err = GitfameError::config_error("invalid order");
        assert!(matches!(err, GitfameError::ConfigError { .. }));
        assert_eq!(err.name(), "ConfigError");
        assert_eq!(err.to_string(), "Configuration error: invalid order");
    }

    #[test]
    fn test_config_error_with_path_mentions_file() {
        let err = GitfameError::config_error_with_path("bad key", PathBuf::from("Gitfame.toml"));
        let display = err.to_string();
        assert!(display.contains("Gitfame.toml"), "display should name the file");
        assert!(display.contains("bad key"));
        assert!(
            err.suggestions().iter().any(|s| s.contains("TOML")),
            "file-backed config errors should suggest checking TOML syntax"
        );
    }

    #[test]
    fn test_git_command_failed_displays_stderr() {
        let err = GitfameError::git_command_failed(
            "blame",
            PathBuf::from("/repo"),
            "fatal: no such path 'x.go' in HEAD\n",
        );
        assert_eq!(err.name(), "GitError");
        assert_eq!(
            err.to_string(),
            "Git error during 'blame' at '/repo': fatal: no such path 'x.go' in HEAD"
        );
    }

    #[test]
    fn test_git_error_without_stderr_says_operation_failed() {
        let err = GitfameError::git_error("ls-tree");
        assert_eq!(err.to_string(), "Git error during 'ls-tree': operation failed");
    }

    #[test]
    fn test_git_spawn_failed_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "git not found");
        let err = GitfameError::git_spawn_failed("log", PathBuf::from("."), io_err);
        assert!(
            std::error::Error::source(&err).is_some(),
            "spawn failures should expose the io error as source"
        );
    }

    #[test]
    fn test_parse_error_with_file_mentions_file() {
        let err = GitfameError::parse_error_with_file("a.go", "unexpected output format: abc");
        assert_eq!(err.name(), "ParseError");
        assert_eq!(
            err.to_string(),
            "Parse error for 'a.go': unexpected output format: abc"
        );
    }

    #[test]
    fn test_io_error_with_source_creates_error_with_path_and_source() {
        let path = PathBuf::from("/test/langs.json");
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err = GitfameError::io_error_with_source("read", path.clone(), io_err);
        assert!(matches!(err, GitfameError::IoError { path: p, .. } if p == Some(path)));
    }

    #[test]
    fn test_render_error_display() {
        let err = GitfameError::render_error("tabular", "broken pipe");
        assert_eq!(err.name(), "RenderError");
        assert_eq!(err.to_string(), "Failed to render tabular output: broken pipe");
    }

    #[test]
    fn test_invalid_input_with_arg_creates_error_with_argument() {
        let err = GitfameError::invalid_input_with_arg("must be at least 1", "jobs");
        assert!(
            matches!(err, GitfameError::InvalidInput { argument, .. } if argument == Some("jobs".to_string()))
        );
    }

    #[test]
    fn test_from_toml_de_error_creates_config_error() {
        let toml_err = toml::from_str::<toml::Value>("invalid = [unclosed").unwrap_err();
        let err: GitfameError = toml_err.into();
        assert!(matches!(err, GitfameError::ConfigError { .. }));
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_from_regex_error_creates_config_error() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: GitfameError = regex_err.into();
        assert!(matches!(err, GitfameError::ConfigError { .. }));
        assert!(err.to_string().contains("Invalid path pattern"));
    }

    #[test]
    fn test_from_csv_error_creates_render_error() {
        let csv_err = csv::Error::from(io::Error::other("csv error"));
        let err: GitfameError = csv_err.into();
        assert!(matches!(err, GitfameError::RenderError { .. }));
    }

    #[test]
    fn test_from_serde_json_error_creates_render_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: GitfameError = json_err.into();
        assert!(matches!(err, GitfameError::RenderError { .. }));
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_question_mark_operator_works_with_result() {
        fn may_fail(should_fail: bool) -> Result<i32> {
            if should_fail {
                Err(GitfameError::config_error("failed"))
            } else {
                Ok(42)
            }
        }

        fn uses_question_mark(should_fail: bool) -> Result<i32> {
            let val = may_fail(should_fail)?;
            Ok(val + 8)
        }

        assert!(matches!(uses_question_mark(false), Ok(50)));
        assert!(uses_question_mark(true).is_err());
    }
}
