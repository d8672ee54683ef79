/// Entry classification against the configured sorting rules.
///
/// This module decides, for a single directory entry, which category subfolder
/// it belongs in. It performs no I/O: the entry's name and directory flag are
/// captured by the lister before classification.
///
/// # Examples
///
/// ```
/// use dirsort::config::RuleSet;
/// use dirsort::file_category::{Decision, Entry, classify};
///
/// let rules = RuleSet::from_json(
///     r#"{"main_folders": [], "special_files": {}, "folders": {"Images": [".jpg"]}}"#,
/// )
/// .unwrap();
///
/// let entry = Entry::file("photo.JPG");
/// assert_eq!(classify(&entry, &rules), Decision::Category("Images".to_string()));
/// ```
use crate::config::RuleSet;

/// Destination for directories that are not recognized category folders.
pub const FOLDERS_CATEGORY: &str = "Folders";

/// Destination for files that match no rule.
pub const OTHER_CATEGORY: &str = "Other";

/// One item observed in the target directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The entry's file name, without any directory component.
    pub name: String,
    /// Whether the entry was a directory at scan time.
    pub is_dir: bool,
}

impl Entry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }
}

/// Where an entry should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Leave the entry where it is.
    Skip,
    /// Move the entry under the named category subfolder.
    Category(String),
}

impl Decision {
    /// Returns the category name, or `None` for `Skip`.
    pub fn category(&self) -> Option<&str> {
        match self {
            Decision::Skip => None,
            Decision::Category(name) => Some(name),
        }
    }
}

/// Classifies an entry against the rules.
///
/// Rules are applied in strict priority order:
/// 1. Directories: `Skip` if listed in `main_folders`, otherwise `Folders`
/// 2. The first `special_files` suffix of the lower-cased name
/// 3. The first `folders` category containing the lower-cased extension
/// 4. `Other`
pub fn classify(entry: &Entry, rules: &RuleSet) -> Decision {
    if entry.is_dir {
        if rules.is_main_folder(&entry.name) {
            return Decision::Skip;
        }
        return Decision::Category(FOLDERS_CATEGORY.to_string());
    }

    let name = entry.name.to_lowercase();

    if let Some((_, category)) = rules
        .special_files()
        .iter()
        .find(|(pattern, _)| name.ends_with(pattern.as_str()))
    {
        return Decision::Category(category.clone());
    }

    let ext = extension(&name);
    if let Some((category, _)) = rules
        .folders()
        .iter()
        .find(|(_, extensions)| extensions.contains(ext))
    {
        return Decision::Category(category.clone());
    }

    Decision::Category(OTHER_CATEGORY.to_string())
}

/// Returns the extension of a file name, including the leading dot.
///
/// Leading dots are part of the stem, so `.bashrc` has no extension, while a
/// trailing dot is an extension of its own (`notes.` yields `.`).
pub fn extension(name: &str) -> &str {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => &name[stem_start + idx..],
        None => "",
    }
}
