//! CLI output formatting for the pipeline stages.
//!
//! Output is information-centric: every entity leads with its positional
//! index and display title, with counts and taglines as indented context
//! lines. Filesystem detail only appears where it is the identity (skipped
//! directories are named by their directory).
//!
//! ## Scan
//!
//! ```text
//! Documents
//! 001 part-1-introduction (2 files)
//! 002 appendix (1 file)
//!
//! Skipped (no matching [[parts]] entry)
//!     drafts (1 file)
//! ```
//!
//! ## Report
//!
//! ```text
//! Parts
//! 001 Part 1: Introduction (2 files)
//!     Foundations
//!     Lines: 11   Headings: 2   Code blocks: 1   Words: 14
//!
//! Totals
//!     Files: 3   Lines: 15   Headings: 3   Code blocks: 1   Words: 18
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::analyze::{ContentGroup, GlobalTotals};
use crate::config::PartsConfig;
use crate::scan::DocumentSet;
use std::collections::BTreeMap;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 file`, `2 files`.
fn file_count(n: usize) -> String {
    if n == 1 {
        "1 file".to_string()
    } else {
        format!("{n} files")
    }
}

/// Per-directory document tally, keyed by first path segment.
fn tally_by_root(documents: &DocumentSet) -> BTreeMap<&str, usize> {
    let mut tally = BTreeMap::new();
    for path in documents.keys() {
        let normalized = path.strip_prefix('/').unwrap_or(path);
        let root = match normalized.split_once('/') {
            Some((first, _)) => first,
            None => normalized,
        };
        *tally.entry(root).or_insert(0) += 1;
    }
    tally
}

/// Format the scan inventory: configured parts first, in display order,
/// then whatever the walk found that no `[[parts]]` entry claims.
pub fn format_scan_output(documents: &DocumentSet, config: &PartsConfig) -> Vec<String> {
    let mut lines = Vec::new();
    let mut tally = tally_by_root(documents);

    lines.push("Documents".to_string());
    let mut position = 0;
    for part in &config.parts {
        if let Some(count) = tally.remove(part.key.as_str()) {
            position += 1;
            lines.push(format!(
                "{} {} ({})",
                format_index(position),
                part.key,
                file_count(count)
            ));
        }
    }
    if position == 0 {
        lines.push("    (none)".to_string());
    }

    if !tally.is_empty() {
        lines.push(String::new());
        lines.push("Skipped (no matching [[parts]] entry)".to_string());
        for (root, count) in &tally {
            lines.push(format!("    {} ({})", root, file_count(*count)));
        }
    }

    lines
}

/// Format the statistics report: one entry per non-empty part, then totals.
pub fn format_report(groups: &[ContentGroup], totals: &GlobalTotals) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Parts".to_string());
    if groups.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, group) in groups.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            group.title,
            file_count(group.files)
        ));
        if !group.subtitle.is_empty() {
            lines.push(format!("    {}", group.subtitle));
        }
        lines.push(format!(
            "    Lines: {}   Headings: {}   Code blocks: {}   Words: {}",
            group.lines, group.headings, group.code_blocks, group.words
        ));
    }

    lines.push(String::new());
    lines.push("Totals".to_string());
    lines.push(format!(
        "    Files: {}   Lines: {}   Headings: {}   Code blocks: {}   Words: {}",
        totals.files, totals.lines, totals.headings, totals.code_blocks, totals.words
    ));

    lines
}

pub fn print_scan_output(documents: &DocumentSet, config: &PartsConfig) {
    for line in format_scan_output(documents, config) {
        println!("{line}");
    }
}

pub fn print_report(groups: &[ContentGroup], totals: &GlobalTotals) {
    for line in format_report(groups, totals) {
        println!("{line}");
    }
}
