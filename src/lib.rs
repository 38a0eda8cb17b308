//! # mdtally
//!
//! Content statistics for book-style markdown documentation sites. Your
//! filesystem is the data source: top-level directories are the book's
//! parts, markdown files are the content, and a small `config.toml` names
//! the parts and fixes their display order.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! mdtally processes content through three independent stages, each
//! producing output the next stage consumes:
//!
//! ```text
//! 1. Scan     content/   →  documents.json   (filesystem → path→text mapping)
//! 2. Analyze  documents  →  stats.json       (per-part groups + totals)
//! 3. Report   stats      →  stdout           (formatted text report)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: each manifest is human-readable JSON you can inspect.
//! - **Composability**: `stats.json` is the data contract for anything that
//!   wants to render the numbers — dashboards, badges, site widgets.
//! - **Testability**: analysis is a pure function from a path→text mapping
//!   to groups and totals, so unit tests never touch the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content root, reads markdown into the document set |
//! | [`analyze`] | Stage 2 — folds documents into per-part groups and global totals |
//! | [`output`] | Stage 3 — formats the inventory and the statistics report |
//! | [`config`] | `config.toml` loading, validation, and the stock config text |
//!
//! # Design Decisions
//!
//! ## Regex Counting, Not Markdown Parsing
//!
//! Headings, code fences, and words are counted with regular expressions
//! over the raw text rather than a markdown parser. The numbers exist to
//! show the shape and growth of a book, not to be a commonmark-conformant
//! census; the heuristic is a few lines, has no parse failures, and its
//! known blind spots (nested fences, indented code blocks) are documented
//! on [`analyze::DocMetrics`]. Swapping in a real parser would change the
//! numbers without making them more useful.
//!
//! ## Configuration Is the Grouping Model
//!
//! The `[[parts]]` array in `config.toml` is a closed set: it decides which
//! top-level directories count, what they are titled, and the report order.
//! Anything else in the tree — drafts, notes, loose root files — is skipped
//! silently. No front-matter, no annotations inside the content, no
//! inference from directory names.
//!
//! ## Eager Loading
//!
//! The scan stage reads every document into memory before analysis begins.
//! Books are small (even a thousand chapters is a few tens of megabytes),
//! and fully materialized input keeps the analyzer pure and the pipeline
//! stages independent. File reads fan out across a rayon pool sized by
//! `[processing] max_workers`.

pub mod analyze;
pub mod config;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
