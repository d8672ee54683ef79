//! dirsort - sort the entries of a directory into category subfolders
//!
//! This library classifies directory entries by filename suffix and extension
//! against JSON rules, and moves them into per-category subdirectories of the
//! directory being organized.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod organizer;
pub mod output;
pub mod target;

pub use config::{ConfigError, RuleSet};
pub use file_category::{Decision, Entry, classify};
pub use file_organizer::{FileOrganizer, Outcome, PlaceError, Placement};
pub use organizer::{DirectoryLister, FsLister, OrganizeError, Reporter, RunReport, run};
pub use target::{TargetDir, TargetError};

pub use cli::{Cli, run_cli};
