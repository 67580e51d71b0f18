//! Language catalog and extension resolution.
//!
//! `--languages go,python` is a shorthand for "files whose extension belongs to
//! one of these languages". The mapping from language name to extensions comes
//! from a catalog: a JSON array of `{"name", "type", "extensions"}` records. A
//! default catalog is compiled into the binary; a user-supplied file with the
//! same shape can replace it.

use crate::error::{GitfameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The catalog shipped with gitfame.
const EMBEDDED_CATALOG: &str = include_str!("../data/language_extensions.json");

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    /// Human readable language name, matched case-insensitively.
    pub name: String,
    /// Linguist-style category ("programming", "data", "markup", "prose").
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Extensions including the leading dot, e.g. `.rs`.
    pub extensions: Vec<String>,
}

/// Lookup table from language name to file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parses a catalog from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let languages: Vec<Language> = serde_json::from_str(text).map_err(|e| {
            GitfameError::config_error(format!("Failed to parse language catalog: {}", e))
        })?;
        Ok(Self { languages })
    }

    /// Reads a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            GitfameError::io_error_with_source("read language catalog", path.to_path_buf(), e)
        })?;
        Self::from_json(&text).map_err(|e| {
            GitfameError::config_error_with_path(e.to_string(), path.to_path_buf())
        })
    }

    /// Loads the catalog at `path`, or the embedded one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// All catalog entries in file order.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Returns the union of the extensions of every named language.
    ///
    /// Names are matched case-insensitively after trimming. Unknown names are
    /// ignored, and an empty `names` yields an empty set (no restriction).
    ///
    /// # Examples
    ///
    /// ```
    /// use gitfame_core::languages::LanguageCatalog;
    ///
    /// # fn main() -> gitfame_core::Result<()> {
    /// let catalog = LanguageCatalog::embedded()?;
    /// let exts = catalog.resolve_extensions(&["GO", "klingon"]);
    /// assert!(exts.contains(".go"));
    /// assert_eq!(exts.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn resolve_extensions<S: AsRef<str>>(&self, names: &[S]) -> HashSet<String> {
        let wanted: HashSet<String> = names
            .iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        self.languages
            .iter()
            .filter(|lang| wanted.contains(&lang.name.to_lowercase()))
            .flat_map(|lang| lang.extensions.iter().cloned())
            .collect()
    }
}
