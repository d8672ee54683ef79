//! Resolution of the directory to organize.
//!
//! The target comes from the `DIR` environment variable, which may be set in
//! the process environment or in a `.env` file. Variables already present in
//! the environment take precedence over the file.

use std::path::{Path, PathBuf};

/// Environment variable naming the directory to organize.
pub const TARGET_DIR_VAR: &str = "DIR";

/// Errors that can occur while resolving the target directory.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("The 'DIR' environment variable is not set or is empty. Please define it in your .env file.")]
    Unset,
    #[error("The path '{}' does not exist or is not a directory.", .0.display())]
    NotADirectory(PathBuf),
    #[error("Failed to load environment file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// A validated, existing directory to organize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir(PathBuf);

impl TargetDir {
    /// Validates that `path` names an existing directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, TargetError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(TargetError::Unset);
        }
        if !path.is_dir() {
            return Err(TargetError::NotADirectory(path));
        }
        Ok(Self(path))
    }

    /// Resolves the target from a variable lookup.
    ///
    /// `lookup` is consulted for `DIR`; an absent or empty value is
    /// `TargetError::Unset`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TargetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(TARGET_DIR_VAR) {
            Some(value) if !value.is_empty() => Self::new(value),
            _ => Err(TargetError::Unset),
        }
    }

    /// Resolves the target from the process environment.
    pub fn from_env() -> Result<Self, TargetError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TargetDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Loads variables from an env file into the process environment.
///
/// With `path` set the file is read from there, otherwise `.env` is looked up
/// from the working directory. A missing file is not an error; returns whether
/// a file was loaded.
///
/// # Errors
///
/// Returns `TargetError::EnvFile` if the file exists but cannot be parsed.
pub fn load_env_file(path: Option<&Path>) -> Result<bool, TargetError> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| true),
        None => dotenvy::dotenv().map(|_| true),
    };

    match loaded {
        Ok(loaded) => Ok(loaded),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no env file found");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_unset_variable() {
        let result = TargetDir::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(TargetError::Unset)));
    }

    #[test]
    fn test_empty_variable() {
        let result = TargetDir::from_lookup(lookup_from(&[("DIR", "")]));
        assert!(matches!(result, Err(TargetError::Unset)));
    }

    #[test]
    fn test_nonexistent_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");
        let missing_str = missing.to_string_lossy().to_string();

        let result = TargetDir::from_lookup(lookup_from(&[("DIR", &missing_str)]));
        assert!(matches!(result, Err(TargetError::NotADirectory(ref p)) if *p == missing));
    }

    #[test]
    fn test_path_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").expect("Failed to write file");

        let result = TargetDir::new(&file);
        assert!(matches!(result, Err(TargetError::NotADirectory(_))));
    }

    #[test]
    fn test_valid_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir_str = temp_dir.path().to_string_lossy().to_string();

        let target = TargetDir::from_lookup(lookup_from(&[("DIR", &dir_str)])).unwrap();
        assert_eq!(target.path(), temp_dir.path());
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let loaded = load_env_file(Some(&temp_dir.path().join(".env"))).unwrap();
        assert!(!loaded);
    }

    #[test]
    fn test_malformed_env_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let env_path = temp_dir.path().join(".env");
        std::fs::write(&env_path, "DIRSORT_TEST_VALUE='unterminated\n").expect("Failed to write");

        let result = load_env_file(Some(&env_path));
        assert!(matches!(result, Err(TargetError::EnvFile(_))));
    }
}
