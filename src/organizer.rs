//! The organize pass over a target directory.
//!
//! A run takes one snapshot of the directory listing, then classifies and
//! places each entry in turn. Collisions are recorded and the pass continues;
//! any placement error stops the pass, leaving earlier moves in place and
//! later entries untouched.

use crate::config::RuleSet;
use crate::file_category::{Decision, Entry, classify};
use crate::file_organizer::{FileOrganizer, Outcome, PlaceError, Placement};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that prevent a run from starting.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    #[error("Error reading directory {}: {source}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Supplies the entries of a directory.
pub trait DirectoryLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>>;
}

/// Lists a directory from the filesystem, sorted by name.
///
/// Directory detection follows symlinks. Entries whose names are not valid
/// UTF-8 are left out.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %entry.path().display(), "skipping entry with non UTF-8 name");
                continue;
            };
            let is_dir = entry.path().is_dir();
            entries.push(Entry::new(name, is_dir));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Receives progress of a run.
///
/// Every method except `moved` has an empty default so reporters only
/// implement what they display.
pub trait Reporter {
    /// Called once after the listing, before the first entry is handled.
    fn begin(&mut self, _dir: &Path, _total: usize) {}

    /// An entry was left in place as a recognized category folder.
    fn skipped(&mut self, _entry: &Entry) {}

    /// An entry was moved into its category.
    fn moved(&mut self, placement: &Placement);

    /// The destination was taken; the entry stays where it is.
    fn collision(&mut self, _entry: &Entry, _category: &str, _destination: &Path) {}

    /// Placing an entry failed and the run is stopping.
    fn failed(&mut self, _entry: &Entry, _error: &PlaceError) {}

    /// Called once when the run is over, whether or not it was stopped.
    fn finish(&mut self, _report: &RunReport) {}
}

/// An entry whose destination was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub name: String,
    pub category: String,
    pub destination: PathBuf,
}

/// The failure that stopped a run.
#[derive(Debug)]
pub struct Abort {
    /// The entry being placed when the run stopped.
    pub entry: Entry,
    pub error: PlaceError,
}

/// Summary of one run.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub target_dir: PathBuf,
    /// Moves in the order they happened.
    pub moved: Vec<Placement>,
    /// Names of category folders left in place.
    pub skipped: Vec<String>,
    pub collisions: Vec<Collision>,
    /// Set when a placement error stopped the run.
    pub aborted: Option<Abort>,
}

impl RunReport {
    fn new(target_dir: &Path) -> Self {
        Self {
            started_at: Utc::now(),
            target_dir: target_dir.to_path_buf(),
            moved: Vec::new(),
            skipped: Vec::new(),
            collisions: Vec::new(),
            aborted: None,
        }
    }

    /// True if every entry was handled.
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }

    /// Number of moves per category, sorted by category name.
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for placement in &self.moved {
            *counts.entry(placement.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Organizes `target_dir` according to `rules`.
///
/// The listing is taken once up front; category folders created during the
/// pass are never revisited. A placement error is reported to `reporter`,
/// recorded in `RunReport::aborted`, and ends the pass.
///
/// # Errors
///
/// Returns `OrganizeError::ListFailed` if the directory cannot be listed. No
/// entry has been touched in that case.
///
/// # Examples
///
/// ```no_run
/// use dirsort::config::RuleSet;
/// use dirsort::organizer::{FsLister, run};
/// use dirsort::output::ConsoleReporter;
/// use std::path::Path;
///
/// let rules = RuleSet::load(Path::new("config.json")).unwrap();
/// let mut reporter = ConsoleReporter::new(false);
/// let report = run(&rules, Path::new("/home/user/Downloads"), &FsLister, &mut reporter).unwrap();
/// println!("{} entries moved", report.moved.len());
/// ```
pub fn run(
    rules: &RuleSet,
    target_dir: &Path,
    lister: &dyn DirectoryLister,
    reporter: &mut dyn Reporter,
) -> Result<RunReport, OrganizeError> {
    let entries = lister
        .list(target_dir)
        .map_err(|source| OrganizeError::ListFailed {
            path: target_dir.to_path_buf(),
            source,
        })?;

    let mut report = RunReport::new(target_dir);
    reporter.begin(target_dir, entries.len());

    for entry in entries {
        let decision = classify(&entry, rules);
        tracing::debug!(name = %entry.name, is_dir = entry.is_dir, ?decision, "classified entry");

        let category = match decision {
            Decision::Skip => {
                reporter.skipped(&entry);
                report.skipped.push(entry.name);
                continue;
            }
            Decision::Category(category) => category,
        };

        match FileOrganizer::place(target_dir, &entry.name, &category) {
            Ok(Outcome::Moved(placement)) => {
                reporter.moved(&placement);
                report.moved.push(placement);
            }
            Ok(Outcome::Collision { destination }) => {
                reporter.collision(&entry, &category, &destination);
                report.collisions.push(Collision {
                    name: entry.name,
                    category,
                    destination,
                });
            }
            Err(error) => {
                reporter.failed(&entry, &error);
                report.aborted = Some(Abort { entry, error });
                break;
            }
        }
    }

    reporter.finish(&report);
    Ok(report)
}
