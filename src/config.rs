//! Sorting rules loaded from a JSON configuration file.
//!
//! The rules decide which category subfolder each directory entry is moved
//! into. Three tables are supported:
//! - `main_folders`: names of directories that are already category folders
//! - `special_files`: filename suffixes that take precedence over extensions
//! - `folders`: category names mapped to the extensions they collect
//!
//! # Configuration File Format
//!
//! ```json
//! {
//!     "main_folders": ["Images", "Archives", "Folders", "Other"],
//!     "special_files": { ".tar.gz": "Archives", ".gitignore": "Code" },
//!     "folders": {
//!         "Images": [".jpg", ".png"],
//!         "Archives": [".zip", ".gz"]
//!     }
//! }
//! ```
//!
//! Object order is significant: `special_files` and `folders` are matched in
//! the order they are written, first match wins. Patterns and extensions are
//! compared as written against the lower-cased filename, so they must be
//! lower-case to ever match.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Errors that can occur while loading the sorting rules.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read.
    #[error("IO error reading configuration {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Not valid JSON, or a required table is missing or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
    /// A category name cannot be used as a subfolder name.
    #[error("Invalid category name '{category}': {reason}")]
    InvalidCategory {
        category: String,
        reason: &'static str,
    },
}

/// Parsed sorting rules. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    main_folders: HashSet<String>,
    #[serde(deserialize_with = "ordered_map")]
    special_files: Vec<(String, String)>,
    #[serde(deserialize_with = "ordered_map")]
    folders: Vec<(String, HashSet<String>)>,
}

impl RuleSet {
    /// Builds a rule set from already ordered tables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCategory` if any category name is not a
    /// single relative path segment.
    pub fn new(
        main_folders: impl IntoIterator<Item = String>,
        special_files: Vec<(String, String)>,
        folders: Vec<(String, HashSet<String>)>,
    ) -> Result<Self, ConfigError> {
        let rules = Self {
            main_folders: main_folders.into_iter().collect(),
            special_files,
            folders,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Loads the rules from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist.
    /// Returns `ConfigError::Io` if it exists but cannot be read.
    /// Returns `ConfigError::Invalid` if JSON parsing fails.
    /// Returns `ConfigError::InvalidCategory` for unusable category names.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let rules = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            special_files = rules.special_files.len(),
            folders = rules.folders.len(),
            "loaded sorting rules"
        );
        Ok(rules)
    }

    /// Parses the rules from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Directory names that are recognized category folders.
    pub fn main_folders(&self) -> &HashSet<String> {
        &self.main_folders
    }

    /// Suffix rules in declaration order.
    pub fn special_files(&self) -> &[(String, String)] {
        &self.special_files
    }

    /// Extension rules in declaration order.
    pub fn folders(&self) -> &[(String, HashSet<String>)] {
        &self.folders
    }

    pub fn is_main_folder(&self, name: &str) -> bool {
        self.main_folders.contains(name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let categories = self
            .special_files
            .iter()
            .map(|(_, category)| category)
            .chain(self.folders.iter().map(|(category, _)| category));

        for category in categories {
            check_category_name(category)?;
        }
        Ok(())
    }
}

/// Rejects category names that would escape or alias the target directory.
fn check_category_name(category: &str) -> Result<(), ConfigError> {
    let reason = if category.is_empty() {
        "name is empty"
    } else if category == "." || category == ".." {
        "name refers to a relative directory"
    } else if category.contains('/') || category.contains(std::path::MAIN_SEPARATOR) {
        "name contains a path separator"
    } else if category.contains('\0') {
        "name contains a NUL byte"
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidCategory {
        category: category.to_string(),
        reason,
    })
}

/// Deserializes a JSON object into `(key, value)` pairs, keeping document order.
fn ordered_map<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct OrderedMapVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a JSON object")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
}
