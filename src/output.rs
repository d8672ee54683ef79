//! Output formatting and styling module.
//!
//! Provides the terminal side of a run: colored status lines, an optional
//! progress bar, and the closing summary table. `ConsoleReporter` plugs these
//! into the organizer as its `Reporter`.

use crate::file_category::Entry;
use crate::file_organizer::{PlaceError, Placement};
use crate::organizer::{Reporter, RunReport};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::Path;

/// Prints styled messages.
///
/// - Success lines (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an error message in red with an X mark.
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// OutputFormatter::error("Configuration file not found: config.json");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{}", Self::error_line(message));
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{}", Self::warning_line(message));
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    fn success_line(message: &str) -> String {
        format!("{} {}", "✓".green(), message)
    }

    fn error_line(message: &str) -> String {
        format!("{} {}", "✗".red(), message)
    }

    fn warning_line(message: &str) -> String {
        format!("{} {}", "⚠".yellow(), message)
    }

    /// Creates a progress bar for `total` entries.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        // The template is a literal; fall back to the default style if it is rejected
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Renders the per-category move counts as a table.
    ///
    /// ```
    /// use dirsort::output::OutputFormatter;
    /// use std::collections::BTreeMap;
    ///
    /// colored::control::set_override(false);
    /// let mut counts = BTreeMap::new();
    /// counts.insert("Images", 2);
    /// counts.insert("Other", 1);
    /// let table = OutputFormatter::summary_table(&counts, 3);
    /// assert!(table.contains("Images   | 2 entries"));
    /// ```
    pub fn summary_table(category_counts: &BTreeMap<&str, usize>, total: usize) -> String {
        let width = category_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Category" width

        let mut lines = Vec::with_capacity(category_counts.len() + 4);
        lines.push(format!(
            "{:<width$} | {}",
            "Category".bold(),
            "Moved".bold(),
            width = width
        ));
        lines.push("-".repeat(width + 12));

        for (category, count) in category_counts {
            lines.push(format!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                entry_word(*count),
                width = width
            ));
        }

        lines.push("-".repeat(width + 12));
        lines.push(format!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            entry_word(total),
            width = width
        ));
        lines.join("\n")
    }
}

fn entry_word(count: usize) -> &'static str {
    if count == 1 { "entry" } else { "entries" }
}

/// Reports a run on the terminal.
pub struct ConsoleReporter {
    show_progress: bool,
    progress: Option<ProgressBar>,
}

impl ConsoleReporter {
    /// Creates a reporter; with `show_progress` a progress bar tracks the pass.
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            progress: None,
        }
    }

    /// Prints a line without tearing the progress bar.
    fn line(&self, line: String) {
        match &self.progress {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }

    fn tick(&self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }
}

impl Reporter for ConsoleReporter {
    fn begin(&mut self, dir: &Path, total: usize) {
        OutputFormatter::info(&format!("Organizing contents of: {}", dir.display()));
        if self.show_progress && total > 0 {
            self.progress = Some(OutputFormatter::create_progress_bar(total as u64));
        }
    }

    fn skipped(&mut self, entry: &Entry) {
        tracing::debug!(name = %entry.name, "left category folder in place");
        self.tick();
    }

    fn moved(&mut self, placement: &Placement) {
        self.line(OutputFormatter::success_line(&format!(
            "{} -> {}/",
            placement.name, placement.category
        )));
        self.tick();
    }

    fn collision(&mut self, entry: &Entry, category: &str, destination: &Path) {
        self.line(OutputFormatter::warning_line(&format!(
            "Skipping {}: the {} folder already has an entry with that name ({})",
            entry.name,
            category,
            destination.display()
        )));
        self.tick();
    }

    fn failed(&mut self, entry: &Entry, error: &PlaceError) {
        let message = if error.is_permission_denied() {
            format!("Not enough permissions to move {}: {}", entry.name, error)
        } else {
            format!("Could not move {}: {}", entry.name, error)
        };
        match &self.progress {
            Some(pb) => pb.suspend(|| OutputFormatter::error(&message)),
            None => OutputFormatter::error(&message),
        }
    }

    fn finish(&mut self, report: &RunReport) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }

        OutputFormatter::header(&format!(
            "SUMMARY (started {})",
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        println!(
            "{}",
            OutputFormatter::summary_table(&report.category_counts(), report.moved.len())
        );

        if !report.skipped.is_empty() {
            OutputFormatter::info(&format!(
                "Category folders left in place: {}",
                report.skipped.len()
            ));
        }
        if !report.collisions.is_empty() {
            OutputFormatter::warning(&format!(
                "{} {} skipped because the destination already exists",
                report.collisions.len(),
                entry_word(report.collisions.len())
            ));
        }
        if report.aborted.is_some() {
            OutputFormatter::error("Run stopped early. Remaining entries were not touched.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table_rows() {
        colored::control::set_override(false);

        let mut counts = BTreeMap::new();
        counts.insert("Archives", 1);
        counts.insert("Images", 3);

        let table = OutputFormatter::summary_table(&counts, 4);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], "Category | Moved");
        assert_eq!(lines[2], "Archives | 1 entry");
        assert_eq!(lines[3], "Images   | 3 entries");
        assert_eq!(lines[5], "Total    | 4 entries");
    }

    #[test]
    fn test_summary_table_widens_for_long_names() {
        colored::control::set_override(false);

        let mut counts = BTreeMap::new();
        counts.insert("Presentations", 2);

        let table = OutputFormatter::summary_table(&counts, 2);
        assert!(table.contains("Presentations | 2 entries"));
        assert!(table.contains("Total         | 2 entries"));
    }

    #[test]
    fn test_entry_word() {
        assert_eq!(entry_word(0), "entries");
        assert_eq!(entry_word(1), "entry");
        assert_eq!(entry_word(2), "entries");
    }
}
